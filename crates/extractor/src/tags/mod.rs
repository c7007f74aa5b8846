// ABOUTME: Tag kind registry with per-kind static metadata.
// ABOUTME: Declares tag names, path attributes, and attribute sets for every supported kind.

//! The tag kind registry.
//!
//! Every supported HTML element kind is an entry in a closed set of variants,
//! each resolving through a single lookup to a static [`TagSpec`] carrying its
//! element name, path attribute, declared attribute set, and closing style.
//! Adding a kind means adding one variant and one spec table entry; nothing
//! else changes.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod value;

pub use value::{AttributeValue, Tag};

/// How a declared attribute is read off a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Read from the element's attribute map; absent or empty becomes null.
    Plain,
    /// True iff the attribute is present at all, regardless of value.
    Boolean,
    /// Read from the element's text content rather than its attribute map.
    TextContent,
}

/// How a rendered fragment is terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// `<img ... />`
    SelfClosing,
    /// `<script ...></script>`
    Paired,
    /// `<a ...>text</a>`, wrapping the kind's `TextContent` value.
    TextWrapped,
}

/// Static metadata for one tag kind.
#[derive(Debug, Clone, Copy)]
pub struct TagSpec {
    pub tag_name: &'static str,
    pub path_attribute: &'static str,
    /// Declared attributes in fixed order. Order affects fragment
    /// re-serialization, not extraction correctness.
    pub attributes: &'static [(&'static str, AttributeKind)],
    pub closing: Closing,
}

const ANCHOR: TagSpec = TagSpec {
    tag_name: "a",
    path_attribute: "href",
    attributes: &[
        ("href", AttributeKind::Plain),
        ("target", AttributeKind::Plain),
        ("title", AttributeKind::Plain),
        ("text", AttributeKind::TextContent),
    ],
    closing: Closing::TextWrapped,
};

const IMAGE: TagSpec = TagSpec {
    tag_name: "img",
    path_attribute: "src",
    attributes: &[
        ("src", AttributeKind::Plain),
        ("alt", AttributeKind::Plain),
        ("width", AttributeKind::Plain),
        ("height", AttributeKind::Plain),
    ],
    closing: Closing::SelfClosing,
};

const SCRIPT: TagSpec = TagSpec {
    tag_name: "script",
    path_attribute: "src",
    attributes: &[
        ("src", AttributeKind::Plain),
        ("async", AttributeKind::Boolean),
        ("defer", AttributeKind::Boolean),
    ],
    closing: Closing::Paired,
};

const LINK: TagSpec = TagSpec {
    tag_name: "link",
    path_attribute: "href",
    attributes: &[
        ("href", AttributeKind::Plain),
        ("type", AttributeKind::Plain),
        ("rel", AttributeKind::Plain),
    ],
    closing: Closing::Paired,
};

/// The closed set of element kinds this crate knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Anchor,
    Image,
    Script,
    Link,
}

impl TagKind {
    /// All supported kinds, in registry order.
    pub const ALL: [TagKind; 4] = [
        TagKind::Anchor,
        TagKind::Image,
        TagKind::Script,
        TagKind::Link,
    ];

    /// The static metadata for this kind.
    pub fn spec(&self) -> &'static TagSpec {
        match self {
            TagKind::Anchor => &ANCHOR,
            TagKind::Image => &IMAGE,
            TagKind::Script => &SCRIPT,
            TagKind::Link => &LINK,
        }
    }

    /// The HTML element name this kind matches.
    pub fn tag_name(&self) -> &'static str {
        self.spec().tag_name
    }

    /// The declared attribute holding the resource path.
    pub fn path_attribute(&self) -> &'static str {
        self.spec().path_attribute
    }

    /// Every attribute this kind knows about, in declaration order.
    pub fn attributes(&self) -> &'static [(&'static str, AttributeKind)] {
        self.spec().attributes
    }

    /// Position of a declared attribute, or None for undeclared names.
    pub(crate) fn attribute_index(&self, name: &str) -> Option<usize> {
        self.spec().attributes.iter().position(|(n, _)| *n == name)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_attribute_is_declared_for_every_kind() {
        for kind in TagKind::ALL {
            assert!(
                kind.attribute_index(kind.path_attribute()).is_some(),
                "path attribute of <{}> must be declared",
                kind.tag_name()
            );
        }
    }

    #[test]
    fn text_wrapped_kinds_declare_exactly_one_text_attribute() {
        for kind in TagKind::ALL {
            let text_attrs = kind
                .attributes()
                .iter()
                .filter(|(_, k)| *k == AttributeKind::TextContent)
                .count();
            match kind.spec().closing {
                Closing::TextWrapped => assert_eq!(text_attrs, 1, "<{}>", kind.tag_name()),
                _ => assert_eq!(text_attrs, 0, "<{}>", kind.tag_name()),
            }
        }
    }

    #[test]
    fn tag_names_match_reference_elements() {
        assert_eq!(TagKind::Anchor.tag_name(), "a");
        assert_eq!(TagKind::Image.tag_name(), "img");
        assert_eq!(TagKind::Script.tag_name(), "script");
        assert_eq!(TagKind::Link.tag_name(), "link");
    }

    #[test]
    fn display_uses_tag_name() {
        assert_eq!(TagKind::Image.to_string(), "img");
    }

    #[test]
    fn attribute_index_rejects_undeclared_names() {
        assert_eq!(TagKind::Image.attribute_index("srcset"), None);
        assert_eq!(TagKind::Script.attribute_index("async"), Some(1));
    }
}
