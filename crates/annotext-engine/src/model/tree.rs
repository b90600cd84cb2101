use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Attributes;
use crate::codec::kinds::{ALT, NAME, StyleFlag, URL};

/// Whether a block renders as body text or as a heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    Statement,
    Heading,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Statement => "statement",
            BlockType::Heading => "heading",
        }
    }
}

/// Editor-side representation of one paragraph block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTree {
    #[serde(default = "new_block_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: BlockType,
    /// Block-level attributes such as `childrenType`; passed through untouched.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default)]
    pub children: Vec<Inline>,
}

fn new_block_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl BlockTree {
    /// Creates an empty block with a freshly generated id.
    pub fn new(kind: BlockType) -> Self {
        Self {
            id: new_block_id(),
            kind,
            attributes: Attributes::new(),
            revision: None,
            children: Vec::new(),
        }
    }

    pub fn statement(id: impl Into<String>, children: Vec<Inline>) -> Self {
        Self {
            id: id.into(),
            children,
            ..Self::new(BlockType::Statement)
        }
    }

    pub fn heading(id: impl Into<String>, children: Vec<Inline>) -> Self {
        Self {
            id: id.into(),
            children,
            ..Self::new(BlockType::Heading)
        }
    }

    /// Returns the canonical form of this tree.
    ///
    /// Empty leaves (cursor gaps) are dropped, adjacent leaves with equal styles
    /// are merged, adjacent links with equal attributes are joined, and links
    /// without any text disappear. Wrappers carry their wire attributes, and a
    /// media wrapper has exactly one empty child holding its styles. Two trees
    /// that render the same content have equal normalized forms.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out: Vec<Inline> = Vec::with_capacity(self.children.len());
        for inline in &self.children {
            match inline {
                Inline::Leaf(leaf) => push_leaf(&mut out, leaf),
                Inline::Wrapper(w) if w.kind == WrapperKind::Link => {
                    let mut children = Vec::with_capacity(w.children.len());
                    for leaf in &w.children {
                        merge_leaf(&mut children, leaf);
                    }
                    if children.is_empty() {
                        continue;
                    }
                    let attributes = w.wire_attributes();
                    if let Some(Inline::Wrapper(prev)) = out.last_mut()
                        && prev.kind == WrapperKind::Link
                        && prev.attributes == attributes
                    {
                        for leaf in &children {
                            merge_leaf(&mut prev.children, leaf);
                        }
                        continue;
                    }
                    out.push(Inline::Wrapper(Wrapper {
                        kind: w.kind,
                        attributes,
                        children,
                    }));
                }
                Inline::Wrapper(w) => {
                    let placeholder = Leaf {
                        text: String::new(),
                        styles: w
                            .children
                            .first()
                            .map(|leaf| leaf.styles.clone())
                            .unwrap_or_default(),
                    };
                    out.push(Inline::Wrapper(Wrapper {
                        kind: w.kind,
                        attributes: w.wire_attributes(),
                        children: vec![placeholder],
                    }));
                }
            }
        }
        Self {
            children: out,
            ..self.clone()
        }
    }
}

fn push_leaf(out: &mut Vec<Inline>, leaf: &Leaf) {
    if leaf.text.is_empty() {
        return;
    }
    if let Some(Inline::Leaf(prev)) = out.last_mut()
        && prev.styles == leaf.styles
    {
        prev.text.push_str(&leaf.text);
        return;
    }
    out.push(Inline::Leaf(leaf.clone()));
}

fn merge_leaf(out: &mut Vec<Leaf>, leaf: &Leaf) {
    if leaf.text.is_empty() {
        return;
    }
    if let Some(prev) = out.last_mut()
        && prev.styles == leaf.styles
    {
        prev.text.push_str(&leaf.text);
        return;
    }
    out.push(leaf.clone());
}

/// A node inside a block: either a styled text run or a wrapper around runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Inline {
    Leaf(Leaf),
    Wrapper(Wrapper),
}

impl From<Leaf> for Inline {
    fn from(leaf: Leaf) -> Self {
        Inline::Leaf(leaf)
    }
}

impl From<Wrapper> for Inline {
    fn from(wrapper: Wrapper) -> Self {
        Inline::Wrapper(wrapper)
    }
}

/// Formatting applied to a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Styles {
    /// Bold.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strong: bool,
    /// Italic.
    #[serde(default, skip_serializing_if = "is_false")]
    pub emphasis: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub superscript: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub subscript: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Ids of the comment threads anchored on this text.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub conversations: BTreeSet<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Styles {
    pub fn has(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Strong => self.strong,
            StyleFlag::Emphasis => self.emphasis,
            StyleFlag::Underline => self.underline,
            StyleFlag::Strikethrough => self.strikethrough,
            StyleFlag::Superscript => self.superscript,
            StyleFlag::Subscript => self.subscript,
            StyleFlag::Code => self.code,
        }
    }

    pub fn set(&mut self, flag: StyleFlag) {
        let slot = match flag {
            StyleFlag::Strong => &mut self.strong,
            StyleFlag::Emphasis => &mut self.emphasis,
            StyleFlag::Underline => &mut self.underline,
            StyleFlag::Strikethrough => &mut self.strikethrough,
            StyleFlag::Superscript => &mut self.superscript,
            StyleFlag::Subscript => &mut self.subscript,
            StyleFlag::Code => &mut self.code,
        };
        *slot = true;
    }

    /// True when no formatting at all is applied.
    pub fn is_plain(&self) -> bool {
        *self == Styles::default()
    }
}

/// A minimal styled text run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub styles: Styles,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Styles::default(),
        }
    }

    /// An empty leaf, used as a cursor gap next to wrappers.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, flag: StyleFlag) -> Self {
        self.styles.set(flag);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.styles.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_conversation(mut self, id: impl Into<String>) -> Self {
        self.styles.conversations.insert(id.into());
        self
    }
}

/// The discriminant of a wrapper node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapperKind {
    Link,
    Embed,
    Image,
    Video,
    File,
}

impl WrapperKind {
    pub const ALL: [WrapperKind; 5] = [
        WrapperKind::Link,
        WrapperKind::Embed,
        WrapperKind::Image,
        WrapperKind::Video,
        WrapperKind::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WrapperKind::Link => "link",
            WrapperKind::Embed => "embed",
            WrapperKind::Image => "image",
            WrapperKind::Video => "video",
            WrapperKind::File => "file",
        }
    }

    /// Media wrappers occupy exactly one placeholder character in the flat text.
    pub fn is_media(self) -> bool {
        !matches!(self, WrapperKind::Link)
    }

    /// Attributes always present on the wire for this kind (empty when unset).
    pub fn required_attributes(self) -> &'static [&'static str] {
        match self {
            WrapperKind::Link | WrapperKind::Embed => &[URL],
            WrapperKind::Image | WrapperKind::Video => &[URL, ALT],
            WrapperKind::File => &[URL, NAME],
        }
    }
}

/// A container node: link text, or an atomic inline media object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wrapper {
    pub kind: WrapperKind,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Leaf>,
}

impl Wrapper {
    pub fn new(kind: WrapperKind, attributes: Attributes) -> Self {
        Self {
            kind,
            attributes,
            children: Vec::new(),
        }
    }

    pub fn link(url: impl Into<String>, children: Vec<Leaf>) -> Self {
        Self {
            children,
            ..Self::new(WrapperKind::Link, attrs([(URL, url.into())]))
        }
    }

    pub fn embed(url: impl Into<String>) -> Self {
        Self::media(WrapperKind::Embed, attrs([(URL, url.into())]))
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::media(WrapperKind::Image, attrs([(URL, url.into()), (ALT, alt.into())]))
    }

    pub fn video(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::media(WrapperKind::Video, attrs([(URL, url.into()), (ALT, alt.into())]))
    }

    pub fn file(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self::media(WrapperKind::File, attrs([(URL, url.into()), (NAME, name.into())]))
    }

    fn media(kind: WrapperKind, attributes: Attributes) -> Self {
        Self {
            children: vec![Leaf::empty()],
            ..Self::new(kind, attributes)
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn url(&self) -> &str {
        self.attribute(URL).unwrap_or_default()
    }

    /// Attributes as written to the annotation: everything this wrapper carries,
    /// plus the kind's required keys defaulted to `""`.
    pub fn wire_attributes(&self) -> Attributes {
        let mut out = self.attributes.clone();
        for key in self.kind.required_attributes() {
            out.entry((*key).to_string()).or_default();
        }
        out
    }
}

fn attrs<const N: usize>(pairs: [(&str, String); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
