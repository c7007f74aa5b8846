// ABOUTME: Main library entry point for the path-extractor crate.
// ABOUTME: Re-exports the public API: Extractor, TagKind, Tag, AttributeValue, TidyOptions, ExtractError.

//! path-extractor - structured attribute extraction from HTML documents.
//!
//! This crate parses arbitrary, possibly malformed HTML and extracts the
//! attribute data of known element kinds (anchors, images, scripts, link
//! elements), optionally resolving relative paths against a base URL and
//! filtering the results by file extension.
//!
//! # Example
//!
//! ```
//! use path_extractor::{Extractor, TagKind};
//!
//! let html = r#"<img src="/i/a.jpg" alt="A"><img src="/i/b.svg" alt="B">"#;
//! let extractor = Extractor::new(html)
//!     .base_url("https://cdn.io")
//!     .extensions(["svg"]);
//!
//! let images = extractor.extract(TagKind::Image)?;
//! assert_eq!(images.len(), 1);
//! assert_eq!(images[0].path(), "https://cdn.io/i/b.svg");
//! # Ok::<(), path_extractor::ExtractError>(())
//! ```

pub mod decode;
pub mod error;
pub mod extractor;
pub mod path;
pub mod sanitize;
mod selectors;
pub mod tags;

pub use crate::decode::decode_bytes;
pub use crate::error::{ExtractError, Result};
pub use crate::extractor::Extractor;
pub use crate::path::{extension_of, resolve};
pub use crate::sanitize::{validate_markup, MarkupCleaner, PassThrough, Sanitize, TidyOptions};
pub use crate::tags::{AttributeKind, AttributeValue, Closing, Tag, TagKind, TagSpec};
