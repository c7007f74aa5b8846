// ABOUTME: Optional HTML repair pre-pass and strict-mode markup validation.
// ABOUTME: Provides TidyOptions, the Sanitize strategy trait, and the ammonia-backed cleaner.

//! The sanitizing pre-pass.
//!
//! Extraction can optionally run the body through a repair step before
//! parsing. The step is a strategy ([`Sanitize`]) so the extractor has no
//! hard dependency on any particular repair implementation; the default
//! [`MarkupCleaner`] re-serializes the document through an ammonia policy
//! permissive enough to keep every element kind the registry knows.
//!
//! Repair is lossy by design: when a tag boundary is broken (for example an
//! unterminated quoted attribute), sibling markup swallowed by the break is
//! dropped from the output rather than failing the call.
//!
//! Without a configured pre-pass the extractor validates markup strictly
//! instead, via [`validate_markup`].

use std::collections::HashSet;

use crate::error::ExtractError;
use crate::tags::TagKind;

/// Tidy-style configuration for the repair pre-pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidyOptions {
    /// Clean up malformed markup. When false the pre-pass passes through.
    pub clean: bool,
    /// Force HTML output. The default cleaner always emits HTML, so this is
    /// honored trivially.
    pub force_output: bool,
    /// Line-wrap width; 0 disables wrapping. The default cleaner never wraps.
    pub wrap: u32,
    /// Text encoding label, used when decoding byte input.
    pub encoding: String,
}

impl Default for TidyOptions {
    fn default() -> Self {
        Self {
            clean: true,
            force_output: true,
            wrap: 0,
            encoding: "utf-8".to_string(),
        }
    }
}

/// Capability to repair a raw HTML string before parsing.
pub trait Sanitize {
    fn repair(&self, html: &str, opts: &TidyOptions) -> Result<String, ExtractError>;
}

/// No-op sanitizer: returns the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Sanitize for PassThrough {
    fn repair(&self, html: &str, _opts: &TidyOptions) -> Result<String, ExtractError> {
        Ok(html.to_string())
    }
}

/// Default repair implementation backed by ammonia.
///
/// The policy keeps common document structure plus every registry tag kind
/// with its declared attributes, and passes relative URLs through untouched.
/// Markup near a broken tag boundary may be dropped; this lossy behavior is
/// accepted and documented.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupCleaner;

impl Sanitize for MarkupCleaner {
    fn repair(&self, html: &str, opts: &TidyOptions) -> Result<String, ExtractError> {
        if !opts.clean {
            return Ok(html.to_string());
        }
        Ok(policy().clean(html).to_string())
    }
}

/// Builds the repair policy.
fn policy() -> ammonia::Builder<'static> {
    let structure = [
        "p", "br", "strong", "b", "em", "i", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol",
        "li", "blockquote", "pre", "code", "span", "div", "table", "thead", "tbody", "tr", "td",
        "th",
    ];

    let mut tags: HashSet<&str> = structure.iter().copied().collect();
    for kind in TagKind::ALL {
        tags.insert(kind.tag_name());
    }

    let mut builder = ammonia::Builder::new();
    builder.tags(tags);

    builder.add_tag_attributes("a", &["href", "target", "title"]);
    builder.add_tag_attributes("img", &["src", "alt", "width", "height"]);
    builder.add_tag_attributes("script", &["src", "async", "defer"]);
    builder.add_tag_attributes("link", &["href", "type", "rel"]);

    builder.generic_attributes(["class", "id"].iter().copied().collect());
    builder.url_schemes(["http", "https", "mailto"].iter().copied().collect());
    builder.link_rel(None);
    // Scripts must survive repair; only style bodies are discarded.
    builder.clean_content_tags(["style"].iter().copied().collect());
    builder
}

/// Strict-mode markup validation, applied when no pre-pass is configured.
///
/// Mild malformation (missing closers, stray `<` in text, unescaped
/// entities) passes; the parser tolerates it. Catastrophic malformation is
/// rejected: an unescaped `<` inside a quoted attribute value, or a quoted
/// value still open at end of input. Both break tag boundaries in ways that
/// swallow neighboring markup.
pub fn validate_markup(html: &str) -> Result<(), ExtractError> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        // Comments are opaque, up to the closing marker.
        if bytes[i..].starts_with(b"<!--") {
            match find_from(bytes, i + 4, b"-->") {
                Some(end) => {
                    i = end + 3;
                    continue;
                }
                None => break,
            }
        }

        // Doctype and processing instructions: skip to the next '>'.
        if matches!(bytes.get(i + 1), Some(b'!') | Some(b'?')) {
            match find_byte_from(bytes, i + 1, b'>') {
                Some(end) => {
                    i = end + 1;
                    continue;
                }
                None => break,
            }
        }

        let mut j = i + 1;
        let is_closing = bytes.get(j) == Some(&b'/');
        if is_closing {
            j += 1;
        }
        if !bytes.get(j).is_some_and(|b| b.is_ascii_alphabetic()) {
            // Stray '<' in text content.
            i += 1;
            continue;
        }

        let name_start = j;
        while j < len && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'-') {
            j += 1;
        }
        let name = html[name_start..j].to_ascii_lowercase();

        // Walk the attribute region.
        while j < len && bytes[j] != b'>' {
            let c = bytes[j];
            if c == b'"' || c == b'\'' {
                let opened_at = j;
                j += 1;
                loop {
                    if j >= len {
                        return Err(ExtractError::invalid_markup(format!(
                            "unterminated attribute value opened at byte {}",
                            opened_at
                        )));
                    }
                    if bytes[j] == c {
                        break;
                    }
                    if bytes[j] == b'<' {
                        return Err(ExtractError::invalid_markup(format!(
                            "unescaped '<' inside attribute value at byte {}",
                            j
                        )));
                    }
                    j += 1;
                }
            }
            j += 1;
        }
        if j >= len {
            // Open tag runs to end of input; the parser recovers.
            break;
        }
        i = j + 1;

        // Raw-text elements: their bodies are opaque to tag scanning.
        if !is_closing && (name == "script" || name == "style") {
            let close = format!("</{}", name);
            match find_ci_from(bytes, i, close.as_bytes()) {
                Some(pos) => i = pos,
                None => break,
            }
        }
    }

    Ok(())
}

fn find_from(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    if start >= bytes.len() || needle.is_empty() {
        return None;
    }
    bytes[start..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| start + p)
}

fn find_byte_from(bytes: &[u8], start: usize, needle: u8) -> Option<usize> {
    bytes[start..].iter().position(|&b| b == needle).map(|p| start + p)
}

/// Case-insensitive search; the needle must already be lowercase ASCII.
fn find_ci_from(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    if start >= bytes.len() || needle.is_empty() {
        return None;
    }
    bytes[start..]
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|p| start + p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mild_malformation_passes() {
        assert!(validate_markup("<p>unclosed paragraph").is_ok());
        assert!(validate_markup("<ul><li>one<li>two</ul>").is_ok());
        assert!(validate_markup("a < b but &gt; c").is_ok());
        assert!(validate_markup(r#"<a href="/x">ok</a>"#).is_ok());
    }

    #[test]
    fn empty_input_passes() {
        assert!(validate_markup("").is_ok());
    }

    #[test]
    fn unescaped_angle_in_attribute_value_is_rejected() {
        let err = validate_markup(r#"<img src="broken.jpg><img src="ok.jpg">"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidMarkup(_)));
    }

    #[test]
    fn unterminated_attribute_value_is_rejected() {
        let err = validate_markup(r#"<img src="never-closed.jpg"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidMarkup(_)));
    }

    #[test]
    fn comments_are_opaque() {
        assert!(validate_markup(r#"<!-- <img src="broken --><p>fine</p>"#).is_ok());
    }

    #[test]
    fn doctype_is_skipped() {
        assert!(validate_markup("<!DOCTYPE html><p>hi</p>").is_ok());
    }

    #[test]
    fn script_bodies_are_opaque() {
        let html = r#"<script>if (a < b) { x = "y"; }</script><p>after</p>"#;
        assert!(validate_markup(html).is_ok());
    }

    #[test]
    fn quoted_script_src_is_still_checked() {
        let err = validate_markup(r#"<script src="a.js><p>x</p>"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidMarkup(_)));
    }

    #[test]
    fn pass_through_returns_input_unchanged() {
        let html = r#"<img src="broken.jpg>"#;
        let out = PassThrough.repair(html, &TidyOptions::default()).unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn cleaner_without_clean_flag_passes_through() {
        let opts = TidyOptions {
            clean: false,
            ..TidyOptions::default()
        };
        let html = "<p>unchanged</p>";
        assert_eq!(MarkupCleaner.repair(html, &opts).unwrap(), html);
    }

    #[test]
    fn cleaner_preserves_registry_tags_and_attributes() {
        let html = r#"<script src="/a.js" async></script><link href="/s.css" rel="stylesheet"><img src="/i.png" alt="i">"#;
        let out = MarkupCleaner.repair(html, &TidyOptions::default()).unwrap();
        assert!(out.contains("<script"), "got: {}", out);
        assert!(out.contains("async"), "got: {}", out);
        assert!(out.contains(r#"href="/s.css""#), "got: {}", out);
        assert!(out.contains(r#"src="/i.png""#), "got: {}", out);
    }

    #[test]
    fn cleaner_keeps_relative_urls() {
        let html = r#"<a href="/media/files/one.pdf">doc</a>"#;
        let out = MarkupCleaner.repair(html, &TidyOptions::default()).unwrap();
        assert!(out.contains(r#"href="/media/files/one.pdf""#), "got: {}", out);
    }

    #[test]
    fn cleaner_repairs_broken_boundary_lossily() {
        let html = r#"<img src="a.jpg><p>swallowed</p><img src="b.jpg">"#;
        let out = MarkupCleaner.repair(html, &TidyOptions::default()).unwrap();
        assert!(validate_markup(&out).is_ok(), "repaired output: {}", out);
        // Markup inside the broken attribute value stays swallowed.
        assert!(!out.contains("<p>"), "repaired output: {}", out);
    }

    #[test]
    fn default_options_use_utf8() {
        let opts = TidyOptions::default();
        assert!(opts.clean);
        assert_eq!(opts.wrap, 0);
        assert_eq!(opts.encoding, "utf-8");
    }
}
