use std::collections::BTreeSet;

use super::{
    code_point::char_count,
    containment::contains,
    cursor::Cursor,
    kinds::{AnnotationKind, COLOR, CONVERSATION_ID},
    options::{CodecOptions, UnknownAnnotations, WrapperOverlap},
    validate::validate,
};
use crate::{
    error::CodecError,
    model::{Annotation, Block, BlockTree, Inline, Leaf, Wrapper},
};

/// An incoming annotation that passed validation, with its parsed kind and
/// identity key.
#[derive(Debug)]
struct Prepared<'a> {
    annotation: &'a Annotation,
    kind: AnnotationKind,
    key: String,
}

/// The wrapper currently receiving leaves.
#[derive(Debug)]
struct OpenWrapper<'a> {
    key: &'a str,
    wrapper: Wrapper,
}

/// State threaded through the code-point scan.
#[derive(Debug)]
struct Scan<'a> {
    text: &'a str,
    overlap: WrapperOverlap,
    out: Vec<Inline>,
    /// Leaf under construction and the byte offset where its text starts.
    leaf: Option<(Leaf, usize)>,
    wrapper: Option<OpenWrapper<'a>>,
    /// Identity keys covering the current leaf.
    active: BTreeSet<&'a str>,
}

/// Converts flat text plus annotations into a leaf tree, with default options.
pub fn deserialize(block: &Block) -> Result<BlockTree, CodecError> {
    deserialize_with(block, &CodecOptions::default())
}

/// Converts flat text plus annotations into a leaf tree.
///
/// A new leaf starts wherever the set of covering annotations changes, so a
/// leaf's text is never split except at an annotation boundary. Link
/// wrappers collect the leaves they cover; media wrappers get one empty
/// child per covered leaf. Every wrapper is surrounded by leaves so an
/// editor cursor can sit on either side of it.
pub fn deserialize_with(block: &Block, options: &CodecOptions) -> Result<BlockTree, CodecError> {
    let prepared = prepare(block, options)?;

    let mut tree = BlockTree {
        id: block.id.clone(),
        kind: block.kind,
        attributes: block.attributes.clone(),
        revision: block.revision.clone(),
        children: Vec::new(),
    };

    if block.text.is_empty() {
        tree.children.push(Leaf::empty().into());
        return Ok(tree);
    }

    let mut scan = Scan::new(&block.text, options.wrapper_overlap);
    let mut cursor = Cursor::new(&block.text);
    while !cursor.eof() {
        let active: Vec<&Prepared> = prepared
            .iter()
            .filter(|p| contains(p.annotation, cursor.pos).is_some())
            .collect();
        scan.visit(cursor.i, cursor.pos, &active)?;
        cursor.bump();
    }
    scan.finish_leaf(block.text.len());
    scan.close_wrapper();

    tree.children = scan.out;
    log::debug!(
        "deserialized block {}: {} annotations into {} nodes",
        block.id,
        prepared.len(),
        tree.children.len()
    );
    Ok(tree)
}

/// Parses and validates the block's annotations, dropping or rejecting
/// unknown types according to `options`.
fn prepare<'a>(block: &'a Block, options: &CodecOptions) -> Result<Vec<Prepared<'a>>, CodecError> {
    let text_len = char_count(&block.text);
    let mut out = Vec::with_capacity(block.annotations.len());

    for annotation in &block.annotations {
        let Some(kind) = AnnotationKind::parse(&annotation.kind) else {
            match options.unknown_annotations {
                UnknownAnnotations::Reject => {
                    return Err(CodecError::UnknownAnnotation(annotation.kind.clone()));
                }
                UnknownAnnotations::Skip => {
                    log::warn!(
                        "block {}: skipping unknown annotation type `{}`",
                        block.id,
                        annotation.kind
                    );
                    continue;
                }
            }
        };
        validate(annotation, text_len)?;
        out.push(Prepared {
            annotation,
            kind,
            key: kind.identity_key(&annotation.attributes),
        });
    }
    Ok(out)
}

impl<'a> Scan<'a> {
    fn new(text: &'a str, overlap: WrapperOverlap) -> Self {
        Self {
            text,
            overlap,
            out: Vec::new(),
            leaf: None,
            wrapper: None,
            active: BTreeSet::new(),
        }
    }

    /// Handles the code point at byte offset `byte` / position `pos`, covered
    /// by `active`.
    ///
    /// Under a media wrapper every code point is a boundary: each placeholder
    /// gets its own wrapper even when neighbours share an identity key.
    fn visit(
        &mut self,
        byte: usize,
        pos: usize,
        active: &[&'a Prepared<'a>],
    ) -> Result<(), CodecError> {
        let keys: BTreeSet<&'a str> = active.iter().map(|p| p.key.as_str()).collect();
        let in_media = self
            .wrapper
            .as_ref()
            .is_some_and(|open| open.wrapper.kind.is_media());
        if self.leaf.is_some() && keys == self.active && !in_media {
            return Ok(());
        }
        self.finish_leaf(byte);
        if in_media {
            self.close_wrapper();
        }
        self.start_leaf(byte, pos, active)?;
        self.active = keys;
        Ok(())
    }

    fn start_leaf(
        &mut self,
        byte: usize,
        pos: usize,
        active: &[&'a Prepared<'a>],
    ) -> Result<(), CodecError> {
        let mut leaf = Leaf::empty();
        let mut wrapper: Option<&'a Prepared<'a>> = None;

        for &p in active {
            match p.kind {
                AnnotationKind::Style(flag) => leaf.styles.set(flag),
                AnnotationKind::Color => {
                    leaf.styles.color = p.annotation.attribute(COLOR).map(str::to_owned);
                }
                AnnotationKind::Conversation => {
                    if let Some(id) = p.annotation.attribute(CONVERSATION_ID) {
                        leaf.styles.conversations.insert(id.to_owned());
                    }
                }
                AnnotationKind::Wrapper(_) => {
                    if let Some(prev) = wrapper
                        && prev.key != p.key
                    {
                        match self.overlap {
                            WrapperOverlap::Reject => {
                                return Err(CodecError::OverlappingWrappers {
                                    pos,
                                    first: prev.key.clone(),
                                    second: p.key.clone(),
                                });
                            }
                            WrapperOverlap::LastWins => log::warn!(
                                "wrappers `{}` and `{}` overlap at position {pos}; keeping `{}`",
                                prev.key,
                                p.key,
                                p.key
                            ),
                        }
                    }
                    wrapper = Some(p);
                }
            }
        }

        match wrapper {
            Some(p) if self.wrapper.as_ref().is_none_or(|open| open.key != p.key) => {
                self.close_wrapper();
                self.open_wrapper(p);
            }
            Some(_) => {}
            None => self.close_wrapper(),
        }

        self.leaf = Some((leaf, byte));
        Ok(())
    }

    /// Ends the current leaf at byte offset `end` and hands it to the open
    /// wrapper or the output.
    fn finish_leaf(&mut self, end: usize) {
        let Some((mut leaf, start)) = self.leaf.take() else {
            return;
        };
        match &mut self.wrapper {
            Some(open) if open.wrapper.kind.is_media() => open.wrapper.children.push(leaf),
            Some(open) => {
                leaf.text = self.text[start..end].to_owned();
                open.wrapper.children.push(leaf);
            }
            None => {
                leaf.text = self.text[start..end].to_owned();
                self.out.push(leaf.into());
            }
        }
    }

    fn open_wrapper(&mut self, p: &'a Prepared<'a>) {
        let AnnotationKind::Wrapper(kind) = p.kind else {
            return;
        };
        self.wrapper = Some(OpenWrapper {
            key: &p.key,
            wrapper: Wrapper::new(kind, p.annotation.attributes.clone()),
        });
    }

    /// Emits the open wrapper, if any, with a cursor-gap leaf on each side.
    fn close_wrapper(&mut self) {
        let Some(open) = self.wrapper.take() else {
            return;
        };
        if !matches!(self.out.last(), Some(Inline::Leaf(_))) {
            self.out.push(Leaf::empty().into());
        }
        self.out.push(open.wrapper.into());
        self.out.push(Leaf::empty().into());
    }
}
