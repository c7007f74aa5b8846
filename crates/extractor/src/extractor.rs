// ABOUTME: Extraction orchestrator tying registry, resolver, sanitizer, and parser together.
// ABOUTME: Holds body/url/extension/tidy configuration and runs extract(kind) over it.

use std::borrow::Cow;
use std::fmt;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::decode::decode_bytes;
use crate::error::ExtractError;
use crate::path::{extension_of, resolve};
use crate::sanitize::{validate_markup, MarkupCleaner, Sanitize, TidyOptions};
use crate::selectors::get_or_compile;
use crate::tags::{AttributeKind, AttributeValue, Tag, TagKind};

/// Extracts tag data from an HTML body.
///
/// Configuration is fluent and can be re-applied any number of times between
/// calls; every [`extract`](Extractor::extract) call is independent,
/// re-parses the current body, and reflects the configuration at call time.
/// Previously returned tag lists are never affected by reconfiguration.
pub struct Extractor {
    body: String,
    url: Option<String>,
    extensions: Option<Vec<String>>,
    tidy: Option<TidyOptions>,
    sanitizer: Box<dyn Sanitize + Send + Sync>,
}

impl Extractor {
    /// Creates an extractor over the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            url: None,
            extensions: None,
            tidy: None,
            sanitizer: Box::new(MarkupCleaner),
        }
    }

    /// Creates an extractor from raw bytes, decoding via the given encoding
    /// label when one is supplied and detection otherwise.
    pub fn from_bytes(bytes: &[u8], encoding: Option<&str>) -> Self {
        Self::new(decode_bytes(bytes, encoding))
    }

    /// Replaces the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the base URL that relative paths are resolved against.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the extension allow-list (no leading dots, case-sensitive).
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Enables the sanitizing pre-pass with the given options.
    pub fn tidy(mut self, opts: TidyOptions) -> Self {
        self.tidy = Some(opts);
        self
    }

    /// Replaces the repair strategy used when tidying is enabled.
    pub fn sanitizer(mut self, sanitizer: Box<dyn Sanitize + Send + Sync>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Extracts all tags of the given kind, in document order.
    ///
    /// Runs the sanitizing pre-pass (or strict markup validation when no
    /// tidy configuration is set), parses the body, reads each matching
    /// element's declared attributes, resolves the path attribute against
    /// the base URL, drops tags with an empty path, and applies the
    /// extension allow-list.
    ///
    /// Absence of matches is not an error: empty bodies, documents without
    /// the requested tag, and filtered-to-nothing results all return an
    /// empty list.
    pub fn extract(&self, kind: TagKind) -> Result<Vec<Tag>, ExtractError> {
        let body: Cow<'_, str> = match &self.tidy {
            Some(opts) => Cow::Owned(self.sanitizer.repair(&self.body, opts)?),
            None => Cow::Borrowed(&self.body),
        };
        if body.is_empty() {
            return Ok(Vec::new());
        }
        if self.tidy.is_none() {
            validate_markup(&body)?;
        }

        let document = Html::parse_document(&body);
        let Some(selector) = get_or_compile(kind.tag_name()) else {
            return Ok(Vec::new());
        };

        let mut tags: Vec<Tag> = document
            .select(&selector)
            .map(|element| self.build_tag(kind, element))
            .filter(|tag| !tag.path().is_empty())
            .collect();
        let matched = tags.len();

        if let Some(extensions) = &self.extensions {
            tags.retain(|tag| {
                extension_of(tag.path()).is_some_and(|ext| extensions.iter().any(|e| e == ext))
            });
        }

        debug!(
            kind = %kind,
            matched,
            kept = tags.len(),
            "extracted tags"
        );
        Ok(tags)
    }

    /// Extracts all anchors.
    pub fn a(&self) -> Result<Vec<Tag>, ExtractError> {
        self.extract(TagKind::Anchor)
    }

    /// Extracts all images.
    pub fn img(&self) -> Result<Vec<Tag>, ExtractError> {
        self.extract(TagKind::Image)
    }

    /// Extracts all scripts.
    pub fn script(&self) -> Result<Vec<Tag>, ExtractError> {
        self.extract(TagKind::Script)
    }

    /// Extracts all link elements.
    pub fn link(&self) -> Result<Vec<Tag>, ExtractError> {
        self.extract(TagKind::Link)
    }

    /// Reads one element's declared attributes into a tag.
    fn build_tag(&self, kind: TagKind, element: ElementRef<'_>) -> Tag {
        let spec = kind.spec();
        let values = spec
            .attributes
            .iter()
            .map(|(name, attr_kind)| {
                if *name == spec.path_attribute {
                    let raw = element.value().attr(name).unwrap_or("");
                    return AttributeValue::Str(resolve(raw, self.url.as_deref()));
                }
                match attr_kind {
                    AttributeKind::Plain => match element.value().attr(name) {
                        Some(v) if !v.is_empty() => AttributeValue::Str(v.to_string()),
                        _ => AttributeValue::Null,
                    },
                    AttributeKind::Boolean => {
                        AttributeValue::Bool(element.value().attr(name).is_some())
                    }
                    AttributeKind::TextContent => {
                        let text: String = element.text().collect();
                        if text.is_empty() {
                            AttributeValue::Null
                        } else {
                            AttributeValue::Str(text)
                        }
                    }
                }
            })
            .collect();
        Tag::from_values(kind, values)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("body", &self.body)
            .field("url", &self.url)
            .field("extensions", &self.extensions)
            .field("tidy", &self.tidy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_body_yields_empty_list() {
        let extractor = Extractor::new("");
        assert_eq!(extractor.extract(TagKind::Image).unwrap(), vec![]);
    }

    #[test]
    fn no_matches_yields_empty_list() {
        let extractor = Extractor::new("<p>no tags of interest</p>");
        assert_eq!(extractor.extract(TagKind::Script).unwrap(), vec![]);
    }

    #[test]
    fn reconfiguration_applies_to_subsequent_calls() {
        let extractor = Extractor::new(r#"<img src="/a.jpg"><img src="/b.svg">"#);
        assert_eq!(extractor.img().unwrap().len(), 2);

        let extractor = extractor.extensions(["svg"]);
        let tags = extractor.img().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].path(), "/b.svg");
    }

    #[test]
    fn body_replacement_discards_previous_content() {
        let extractor = Extractor::new(r#"<img src="/a.jpg">"#).body(r#"<img src="/b.jpg">"#);
        let tags = extractor.img().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].path(), "/b.jpg");
    }

    #[test]
    fn from_bytes_decodes_before_parsing() {
        // windows-1252 é in the alt text.
        let extractor = Extractor::from_bytes(b"<img src=\"/a.jpg\" alt=\"caf\xe9\">", Some("windows-1252"));
        let tags = extractor.img().unwrap();
        assert_eq!(tags[0].get("alt").unwrap().as_str(), Some("caf\u{e9}"));
    }
}
