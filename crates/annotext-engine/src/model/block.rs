use serde::{Deserialize, Serialize};

use super::{Attributes, BlockType, Span};

/// Storage-side representation of one paragraph block.
///
/// `text` is the full paragraph; annotations refer to it by code-point
/// offsets. Empty `annotations` and `attributes` are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: BlockType,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Block {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A named, attributed set of spans over a block's text.
///
/// `starts` and `ends` are parallel arrays: span `i` is `starts[i]..ends[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub starts: Vec<usize>,
    #[serde(default)]
    pub ends: Vec<usize>,
}

impl Annotation {
    /// Creates an annotation with no spans yet.
    pub fn new(kind: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            kind: kind.into(),
            attributes,
            starts: Vec::new(),
            ends: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.starts.push(start);
        self.ends.push(end);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Iterates the `(start, end)` pairs. Extra unmatched entries are ignored.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.starts
            .iter()
            .zip(&self.ends)
            .map(|(&start, &end)| Span { start, end })
    }
}
