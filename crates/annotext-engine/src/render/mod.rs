//! # Render
//!
//! Turns a leaf tree into an HTML fragment for read-only display.
//!
//! A block becomes `<p>` or `<h2>`. Each leaf's styles become nested
//! inline tags, with color and conversation marks outermost. Links render
//! as `<a>`; media wrappers render as their own elements and ignore their
//! (empty) children. All text and attribute values are escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::codec::kinds::{ALT, NAME, StyleFlag};
use crate::model::{BlockTree, BlockType, Inline, Leaf, Wrapper, WrapperKind};

/// Renders `tree` as a single HTML element.
pub fn to_html(tree: &BlockTree) -> String {
    let tag = match tree.kind {
        BlockType::Statement => "p",
        BlockType::Heading => "h2",
    };

    let mut out = String::new();
    out.push('<');
    out.push_str(tag);
    push_attr(&mut out, "data-block-id", &tree.id);
    out.push('>');
    for inline in &tree.children {
        match inline {
            Inline::Leaf(leaf) => render_leaf(&mut out, leaf),
            Inline::Wrapper(wrapper) => render_wrapper(&mut out, wrapper),
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

fn style_tag(flag: StyleFlag) -> &'static str {
    match flag {
        StyleFlag::Strong => "strong",
        StyleFlag::Emphasis => "em",
        StyleFlag::Underline => "u",
        StyleFlag::Strikethrough => "s",
        StyleFlag::Superscript => "sup",
        StyleFlag::Subscript => "sub",
        StyleFlag::Code => "code",
    }
}

fn render_leaf(out: &mut String, leaf: &Leaf) {
    if leaf.text.is_empty() {
        return;
    }
    let styles = &leaf.styles;
    if styles.is_plain() {
        out.push_str(&encode_text(&leaf.text));
        return;
    }
    let mut closers: Vec<&'static str> = Vec::new();

    if let Some(color) = &styles.color {
        out.push_str("<span");
        push_attr(out, "style", &format!("color: {color}"));
        out.push('>');
        closers.push("span");
    }
    if !styles.conversations.is_empty() {
        let ids: Vec<&str> = styles.conversations.iter().map(String::as_str).collect();
        out.push_str("<mark");
        push_attr(out, "data-conversations", &ids.join(" "));
        out.push('>');
        closers.push("mark");
    }
    for flag in StyleFlag::ALL {
        if styles.has(flag) {
            let tag = style_tag(flag);
            out.push('<');
            out.push_str(tag);
            out.push('>');
            closers.push(tag);
        }
    }

    out.push_str(&encode_text(&leaf.text));

    for tag in closers.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn render_wrapper(out: &mut String, wrapper: &Wrapper) {
    let attr = |key: &str| wrapper.attribute(key).unwrap_or_default();
    match wrapper.kind {
        WrapperKind::Link => {
            out.push_str("<a");
            push_attr(out, "href", wrapper.url());
            push_attr(out, "rel", "noopener noreferrer");
            out.push('>');
            for leaf in &wrapper.children {
                render_leaf(out, leaf);
            }
            out.push_str("</a>");
        }
        WrapperKind::Image => {
            out.push_str("<img");
            push_attr(out, "src", wrapper.url());
            push_attr(out, "alt", attr(ALT));
            out.push('>');
        }
        WrapperKind::Video => {
            out.push_str("<video");
            push_attr(out, "src", wrapper.url());
            push_attr(out, "title", attr(ALT));
            out.push_str(" controls></video>");
        }
        WrapperKind::Embed => {
            out.push_str("<span");
            push_attr(out, "data-embed", wrapper.url());
            out.push_str("></span>");
        }
        WrapperKind::File => {
            let name = attr(NAME);
            out.push_str("<a");
            push_attr(out, "href", wrapper.url());
            push_attr(out, "download", name);
            out.push('>');
            out.push_str(&encode_text(name));
            out.push_str("</a>");
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
