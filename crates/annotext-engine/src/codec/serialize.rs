use super::{
    annotation_set::AnnotationSet,
    code_point::char_count,
    kinds::{AnnotationKind, COLOR, CONVERSATION_ID, StyleFlag},
};
use crate::{
    error::CodecError,
    model::{Attributes, Block, BlockTree, Inline, Styles, Wrapper},
};

/// The flat text a media wrapper occupies: one U+FFFC.
const MEDIA_TEXT: &str = "\u{FFFC}";

/// One run of text after flattening, tagged with the wrapper it came from.
#[derive(Debug)]
struct FlatLeaf<'a> {
    text: &'a str,
    styles: Option<&'a Styles>,
    wrapper: Option<&'a Wrapper>,
}

/// Converts a leaf tree into flat text plus annotations.
///
/// Block id, type, attributes and revision are copied across unchanged.
pub fn serialize(tree: &BlockTree) -> Result<Block, CodecError> {
    let mut text = String::new();
    let mut set = AnnotationSet::new();
    let mut pos = 0;

    for leaf in flatten(&tree.children) {
        if leaf.text.is_empty() {
            continue;
        }
        let start = pos;
        let end = pos + char_count(leaf.text);

        if let Some(styles) = leaf.styles {
            add_styles(&mut set, styles, start, end)?;
        }
        if let Some(wrapper) = leaf.wrapper {
            set.add_span(
                AnnotationKind::Wrapper(wrapper.kind),
                wrapper.wire_attributes(),
                start,
                end,
            )?;
        }

        text.push_str(leaf.text);
        pos = end;
    }

    let annotations = set.list();
    log::debug!(
        "serialized block {}: {} code points, {} annotations",
        tree.id,
        pos,
        annotations.len()
    );

    Ok(Block {
        id: tree.id.clone(),
        kind: tree.kind,
        text,
        annotations,
        attributes: tree.attributes.clone(),
        revision: tree.revision.clone(),
    })
}

fn flatten(children: &[Inline]) -> Vec<FlatLeaf<'_>> {
    let mut out = Vec::with_capacity(children.len());
    for inline in children {
        match inline {
            Inline::Leaf(leaf) => out.push(FlatLeaf {
                text: &leaf.text,
                styles: Some(&leaf.styles),
                wrapper: None,
            }),
            Inline::Wrapper(wrapper) if wrapper.kind.is_media() => out.push(FlatLeaf {
                text: MEDIA_TEXT,
                styles: wrapper.children.first().map(|leaf| &leaf.styles),
                wrapper: Some(wrapper),
            }),
            Inline::Wrapper(wrapper) => {
                out.extend(wrapper.children.iter().map(|leaf| FlatLeaf {
                    text: &leaf.text,
                    styles: Some(&leaf.styles),
                    wrapper: Some(wrapper),
                }));
            }
        }
    }
    out
}

fn add_styles(
    set: &mut AnnotationSet,
    styles: &Styles,
    start: usize,
    end: usize,
) -> Result<(), CodecError> {
    for flag in StyleFlag::ALL {
        if styles.has(flag) {
            set.add_span(AnnotationKind::Style(flag), Attributes::new(), start, end)?;
        }
    }
    if let Some(color) = &styles.color {
        let attributes = Attributes::from([(COLOR.to_string(), color.clone())]);
        set.add_span(AnnotationKind::Color, attributes, start, end)?;
    }
    for id in &styles.conversations {
        let attributes = Attributes::from([(CONVERSATION_ID.to_string(), id.clone())]);
        set.add_span(AnnotationKind::Conversation, attributes, start, end)?;
    }
    Ok(())
}
