// ABOUTME: Immutable Tag value object holding one extracted element's attribute values.
// ABOUTME: Provides typed access, path exposure, HTML fragment rendering, and record export.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::ExtractError;
use crate::tags::{AttributeKind, Closing, TagKind};

/// A single attribute value as read off a matched element.
///
/// `Null` marks an absent or empty `Plain`/`TextContent` attribute. Boolean
/// attributes are never `Null`; absence simply means `Bool(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Str(String),
    Bool(bool),
    Null,
}

impl AttributeValue {
    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Str(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Str(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Str(s) => serializer.serialize_str(s),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Null => serializer.serialize_unit(),
        }
    }
}

/// An immutable record of one extracted element.
///
/// Values are stored against the owning kind's declared attribute order, so
/// two tags are equal iff they share a kind and identical values. The source
/// document tree can be dropped once a `Tag` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    kind: TagKind,
    values: Vec<AttributeValue>,
}

impl Tag {
    /// Builds a tag from `(name, value)` pairs.
    ///
    /// Every declared attribute starts at its default (`Bool(false)` for
    /// booleans, `Null` otherwise) and is overwritten by the matching pair.
    /// A pair whose name is not declared for `kind` fails fast with
    /// [`ExtractError::UnknownAttribute`].
    pub fn new<I, S>(kind: TagKind, attributes: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = (S, AttributeValue)>,
        S: AsRef<str>,
    {
        let mut tag = Tag::empty(kind);
        for (name, value) in attributes {
            let name = name.as_ref();
            let index = kind
                .attribute_index(name)
                .ok_or_else(|| ExtractError::unknown_attribute(kind.tag_name(), name))?;
            tag.values[index] = value;
        }
        Ok(tag)
    }

    /// A tag with every attribute at its default value.
    fn empty(kind: TagKind) -> Self {
        let values = kind
            .attributes()
            .iter()
            .map(|(_, k)| match k {
                AttributeKind::Boolean => AttributeValue::Bool(false),
                _ => AttributeValue::Null,
            })
            .collect();
        Tag { kind, values }
    }

    /// Builds a tag from values already in declared order. The extractor
    /// produces values positionally, so no name validation is needed.
    pub(crate) fn from_values(kind: TagKind, values: Vec<AttributeValue>) -> Self {
        debug_assert_eq!(values.len(), kind.attributes().len());
        Tag { kind, values }
    }

    /// The kind this tag was extracted as.
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// The stored value for a declared attribute.
    ///
    /// Requesting a name outside the declared set is a contract violation and
    /// returns [`ExtractError::UnknownAttribute`].
    pub fn get(&self, name: &str) -> Result<&AttributeValue, ExtractError> {
        self.kind
            .attribute_index(name)
            .map(|i| &self.values[i])
            .ok_or_else(|| ExtractError::unknown_attribute(self.kind.tag_name(), name))
    }

    /// The resolved value of this kind's path attribute, always a string.
    pub fn path(&self) -> &str {
        let index = self
            .kind
            .attribute_index(self.kind.path_attribute())
            .unwrap_or_default();
        self.values[index].as_str().unwrap_or("")
    }

    /// Re-serializes this tag as an HTML fragment.
    ///
    /// Attributes appear space-separated in declared order; string values
    /// render only when non-empty and not purely numeric, booleans render as
    /// bare names when true. Text-content values never render as attributes:
    /// text-wrapping kinds emit them between the opening and closing tag.
    pub fn render(&self) -> String {
        let spec = self.kind.spec();
        let mut out = String::from("<");
        out.push_str(spec.tag_name);

        for ((name, attr_kind), value) in spec.attributes.iter().zip(&self.values) {
            if *attr_kind == AttributeKind::TextContent {
                continue;
            }
            match value {
                AttributeValue::Str(s) if renders_as_value(s) => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(s);
                    out.push('"');
                }
                AttributeValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                _ => {}
            }
        }

        match spec.closing {
            Closing::SelfClosing => out.push_str(" />"),
            Closing::Paired => {
                out.push('>');
                out.push_str("</");
                out.push_str(spec.tag_name);
                out.push('>');
            }
            Closing::TextWrapped => {
                out.push('>');
                if let Some(text) = self.text_content() {
                    out.push_str(text);
                }
                out.push_str("</");
                out.push_str(spec.tag_name);
                out.push('>');
            }
        }

        out
    }

    /// The full attribute map verbatim, in declared order.
    pub fn to_record(&self) -> Vec<(&'static str, AttributeValue)> {
        self.kind
            .attributes()
            .iter()
            .zip(&self.values)
            .map(|((name, _), value)| (*name, value.clone()))
            .collect()
    }

    /// The stored text-content value, if this kind declares one.
    fn text_content(&self) -> Option<&str> {
        self.kind
            .attributes()
            .iter()
            .zip(&self.values)
            .find(|((_, k), _)| *k == AttributeKind::TextContent)
            .and_then(|(_, value)| value.as_str())
    }
}

/// A string value renders only when non-empty and not purely numeric.
/// Numeric-only values are suppressed to avoid ambiguity with bare
/// boolean-style attributes.
fn renders_as_value(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_err()
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for ((name, _), value) in self.kind.attributes().iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
