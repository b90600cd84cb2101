//! Annotation types and the attribute names they own.
//!
//! All type strings and attribute keys live here; the serializer and
//! deserializer match on [`AnnotationKind`] and never compare raw strings.

use crate::model::{Attributes, WrapperKind};

/// Attribute holding a link target or media location.
pub const URL: &str = "url";
/// Attribute holding alt text for images and videos.
pub const ALT: &str = "alt";
/// Attribute holding a file's display name.
pub const NAME: &str = "name";
/// Attribute holding a color annotation's value.
pub const COLOR: &str = "color";
/// Attribute holding a conversation annotation's thread id.
pub const CONVERSATION_ID: &str = "conversationId";

/// OBJECT REPLACEMENT CHARACTER: the text occupied by one inline media object.
pub const PLACEHOLDER: char = '\u{FFFC}';

/// Boolean formatting flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleFlag {
    Strong,
    Emphasis,
    Underline,
    Strikethrough,
    Superscript,
    Subscript,
    Code,
}

impl StyleFlag {
    pub const ALL: [StyleFlag; 7] = [
        StyleFlag::Strong,
        StyleFlag::Emphasis,
        StyleFlag::Underline,
        StyleFlag::Strikethrough,
        StyleFlag::Superscript,
        StyleFlag::Subscript,
        StyleFlag::Code,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleFlag::Strong => "strong",
            StyleFlag::Emphasis => "emphasis",
            StyleFlag::Underline => "underline",
            StyleFlag::Strikethrough => "strikethrough",
            StyleFlag::Superscript => "superscript",
            StyleFlag::Subscript => "subscript",
            StyleFlag::Code => "code",
        }
    }
}

/// Every annotation type the codec understands.
///
/// Style-like kinds set values on a leaf; wrapper kinds group leaves into a
/// container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Style(StyleFlag),
    Color,
    Conversation,
    Wrapper(WrapperKind),
}

impl AnnotationKind {
    /// Parses a wire type string. Returns `None` for types the codec doesn't know.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(flag) = StyleFlag::ALL.into_iter().find(|f| f.as_str() == s) {
            return Some(AnnotationKind::Style(flag));
        }
        if let Some(kind) = WrapperKind::ALL.into_iter().find(|k| k.as_str() == s) {
            return Some(AnnotationKind::Wrapper(kind));
        }
        match s {
            "color" => Some(AnnotationKind::Color),
            "conversation" => Some(AnnotationKind::Conversation),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationKind::Style(flag) => flag.as_str(),
            AnnotationKind::Color => "color",
            AnnotationKind::Conversation => "conversation",
            AnnotationKind::Wrapper(kind) => kind.as_str(),
        }
    }

    /// The attribute that tells two annotations of this kind apart, if any.
    pub fn identity_attribute(self) -> Option<&'static str> {
        match self {
            AnnotationKind::Style(_) => None,
            AnnotationKind::Color => Some(COLOR),
            AnnotationKind::Conversation => Some(CONVERSATION_ID),
            AnnotationKind::Wrapper(_) => Some(URL),
        }
    }

    /// Canonical identity: `type` alone, or `type:value` for kinds with a
    /// discriminating attribute. Spans sharing a key are one logical annotation.
    pub fn identity_key(self, attributes: &Attributes) -> String {
        match self.identity_attribute() {
            None => self.as_str().to_string(),
            Some(attr) => {
                let value = attributes.get(attr).map(String::as_str).unwrap_or_default();
                format!("{}:{value}", self.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("strong", Some(AnnotationKind::Style(StyleFlag::Strong)))]
    #[case("emphasis", Some(AnnotationKind::Style(StyleFlag::Emphasis)))]
    #[case("code", Some(AnnotationKind::Style(StyleFlag::Code)))]
    #[case("color", Some(AnnotationKind::Color))]
    #[case("conversation", Some(AnnotationKind::Conversation))]
    #[case("link", Some(AnnotationKind::Wrapper(WrapperKind::Link)))]
    #[case("file", Some(AnnotationKind::Wrapper(WrapperKind::File)))]
    #[case("bold", None)]
    #[case("", None)]
    fn parse_wire_types(#[case] input: &str, #[case] expected: Option<AnnotationKind>) {
        assert_eq!(AnnotationKind::parse(input), expected);
    }

    #[test]
    fn parse_round_trips_as_str() {
        for flag in StyleFlag::ALL {
            let kind = AnnotationKind::Style(flag);
            assert_eq!(AnnotationKind::parse(kind.as_str()), Some(kind));
        }
        for w in WrapperKind::ALL {
            let kind = AnnotationKind::Wrapper(w);
            assert_eq!(AnnotationKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn identity_keys() {
        let mut attrs = Attributes::new();
        assert_eq!(
            AnnotationKind::Style(StyleFlag::Strong).identity_key(&attrs),
            "strong"
        );

        attrs.insert(URL.into(), "https://a.com".into());
        attrs.insert(ALT.into(), "ignored".into());
        assert_eq!(
            AnnotationKind::Wrapper(WrapperKind::Image).identity_key(&attrs),
            "image:https://a.com"
        );

        let color = Attributes::from([(COLOR.to_string(), "red".to_string())]);
        assert_eq!(AnnotationKind::Color.identity_key(&color), "color:red");

        let convo = Attributes::from([(CONVERSATION_ID.to_string(), "c1".to_string())]);
        assert_eq!(
            AnnotationKind::Conversation.identity_key(&convo),
            "conversation:c1"
        );
    }

    #[test]
    fn missing_identity_attribute_keys_as_empty() {
        assert_eq!(
            AnnotationKind::Wrapper(WrapperKind::Link).identity_key(&Attributes::new()),
            "link:"
        );
    }
}
