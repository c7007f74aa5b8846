// ABOUTME: Error types for HTML attribute extraction.
// ABOUTME: Provides ExtractError with InvalidMarkup and UnknownAttribute variants.

use thiserror::Error;

/// Errors that can occur during extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The parser or sanitizer could not process the input at all.
    #[error("invalid markup: {0}")]
    InvalidMarkup(String),

    /// An attribute was requested that is not declared for the tag kind.
    /// This is a contract violation by the caller, not a data-quality issue.
    #[error("unknown attribute `{attribute}` for <{tag}>")]
    UnknownAttribute {
        tag: &'static str,
        attribute: String,
    },
}

impl ExtractError {
    /// Creates an InvalidMarkup error with a custom message.
    pub fn invalid_markup(msg: impl Into<String>) -> Self {
        ExtractError::InvalidMarkup(msg.into())
    }

    /// Creates an UnknownAttribute error for the given tag name and attribute.
    pub fn unknown_attribute(tag: &'static str, attribute: impl Into<String>) -> Self {
        ExtractError::UnknownAttribute {
            tag,
            attribute: attribute.into(),
        }
    }
}

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;
