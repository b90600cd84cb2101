use annotext_engine::codec::kinds::StyleFlag;
use annotext_engine::{
    Annotation, Attributes, Block, BlockTree, BlockType, CodecError, Inline, Leaf, MalformedReason,
    Wrapper, deserialize,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const FAMILY: &str = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";

fn mark(kind: &str, start: usize, end: usize) -> Annotation {
    Annotation::new(kind, Attributes::new()).with_span(start, end)
}

fn link(url: &str, start: usize, end: usize) -> Annotation {
    mark("link", start, end).with_attribute("url", url)
}

fn embed(url: &str, start: usize, end: usize) -> Annotation {
    mark("embed", start, end).with_attribute("url", url)
}

fn children(text: &str, annotations: Vec<Annotation>) -> Vec<Inline> {
    let block = Block {
        annotations,
        ..Block::new("blockId", text)
    };
    deserialize(&block).unwrap().children
}

fn gap() -> Inline {
    Leaf::empty().into()
}

#[test]
fn no_annotations() {
    let block = Block::new("blockId", "Hello world");
    assert_eq!(
        deserialize(&block).unwrap(),
        BlockTree::statement("blockId", vec![Leaf::new("Hello world").into()])
    );
}

#[test]
fn heading() {
    let block = Block {
        kind: BlockType::Heading,
        ..Block::new("blockId", "Hello world")
    };
    assert_eq!(
        deserialize(&block).unwrap(),
        BlockTree::heading("blockId", vec![Leaf::new("Hello world").into()])
    );
}

#[test]
fn empty_text() {
    assert_eq!(children("", vec![]), vec![gap()]);
}

#[rstest]
#[case::single_letter("h")]
#[case::single_emoji("\u{1F605}")]
#[case::text_and_emoji("hello \u{1F605}")]
fn unannotated_text_is_one_leaf(#[case] text: &str) {
    assert_eq!(children(text, vec![]), vec![Leaf::new(text).into()]);
}

#[test]
fn single_letter_with_mark() {
    assert_eq!(
        children("A", vec![mark("strong", 0, 1)]),
        vec![Leaf::new("A").with(StyleFlag::Strong).into()]
    );
}

#[test]
fn all_marks() {
    let out = children(
        "A B C D E F G",
        vec![
            mark("subscript", 0, 2).with_span(10, 12),
            mark("emphasis", 2, 4),
            mark("underline", 4, 6),
            mark("strikethrough", 6, 8),
            mark("superscript", 8, 10),
            mark("code", 12, 13),
        ],
    );
    assert_eq!(
        out,
        vec![
            Leaf::new("A ").with(StyleFlag::Subscript).into(),
            Leaf::new("B ").with(StyleFlag::Emphasis).into(),
            Leaf::new("C ").with(StyleFlag::Underline).into(),
            Leaf::new("D ").with(StyleFlag::Strikethrough).into(),
            Leaf::new("E ").with(StyleFlag::Superscript).into(),
            Leaf::new("F ").with(StyleFlag::Subscript).into(),
            Leaf::new("G").with(StyleFlag::Code).into(),
        ]
    );
}

#[test]
fn overlapping_marks() {
    let out = children(
        "Mintter is Awesome",
        vec![mark("strong", 0, 10), mark("emphasis", 8, 18)],
    );
    assert_eq!(
        out,
        vec![
            Leaf::new("Mintter ").with(StyleFlag::Strong).into(),
            Leaf::new("is")
                .with(StyleFlag::Strong)
                .with(StyleFlag::Emphasis)
                .into(),
            Leaf::new(" Awesome").with(StyleFlag::Emphasis).into(),
        ]
    );
}

#[test]
fn one_annotation_many_spans() {
    let out = children(
        "Alice, Bob and Carol",
        vec![mark("strong", 0, 5).with_span(15, 20)],
    );
    assert_eq!(
        out,
        vec![
            Leaf::new("Alice").with(StyleFlag::Strong).into(),
            Leaf::new(", Bob and ").into(),
            Leaf::new("Carol").with(StyleFlag::Strong).into(),
        ]
    );
}

#[rstest]
#[case::family(format!("hello from {FAMILY} family"), 6, 25, "hello ", format!("from {FAMILY} family"))]
#[case::faces(format!("\u{1F600} \u{1F60E} {FAMILY}"), 4, 11, "\u{1F600} \u{1F60E} ", FAMILY.to_string())]
fn emoji_offsets(
    #[case] text: String,
    #[case] start: usize,
    #[case] end: usize,
    #[case] plain: &str,
    #[case] styled: String,
) {
    assert_eq!(
        children(&text, vec![mark("emphasis", start, end)]),
        vec![
            Leaf::new(plain).into(),
            Leaf::new(styled).with(StyleFlag::Emphasis).into(),
        ]
    );
}

#[test]
fn colors_and_conversations() {
    let out = children(
        "red green",
        vec![
            mark("color", 0, 4).with_attribute("color", "red"),
            mark("color", 4, 9).with_attribute("color", "green"),
            mark("conversation", 2, 6).with_attribute("conversationId", "c1"),
        ],
    );
    assert_eq!(
        out,
        vec![
            Leaf::new("re").with_color("red").into(),
            Leaf::new("d ").with_color("red").with_conversation("c1").into(),
            Leaf::new("gr").with_color("green").with_conversation("c1").into(),
            Leaf::new("een").with_color("green").into(),
        ]
    );
}

#[test]
fn simple_link() {
    assert_eq!(
        children("hello Mintter", vec![link("https://mintter.com", 6, 13)]),
        vec![
            Leaf::new("hello ").into(),
            Wrapper::link("https://mintter.com", vec![Leaf::new("Mintter")]).into(),
            gap(),
        ]
    );
}

#[test]
fn link_at_start_with_mark() {
    assert_eq!(
        children(
            "AB",
            vec![link("https://hola.com", 0, 1), mark("strong", 0, 1)]
        ),
        vec![
            gap(),
            Wrapper::link(
                "https://hola.com",
                vec![Leaf::new("A").with(StyleFlag::Strong)]
            )
            .into(),
            gap(),
            Leaf::new("B").into(),
        ]
    );
}

#[test]
fn adjacent_links() {
    assert_eq!(
        children(
            "Mintterdemo",
            vec![
                link("https://mintter.com", 0, 7),
                link("https://demo.com", 7, 11)
            ]
        ),
        vec![
            gap(),
            Wrapper::link("https://mintter.com", vec![Leaf::new("Mintter")]).into(),
            gap(),
            Wrapper::link("https://demo.com", vec![Leaf::new("demo")]).into(),
            gap(),
        ]
    );
}

#[test]
fn link_with_marks() {
    assert_eq!(
        children(
            "hello Mintter team!",
            vec![
                link("https://mintter.com", 6, 19),
                mark("strong", 14, 19)
            ]
        ),
        vec![
            Leaf::new("hello ").into(),
            Wrapper::link(
                "https://mintter.com",
                vec![
                    Leaf::new("Mintter "),
                    Leaf::new("team!").with(StyleFlag::Strong)
                ]
            )
            .into(),
            gap(),
        ]
    );
}

#[rstest]
#[case::image(mark("image", 0, 1).with_attribute("url", "https://mintter.com/image").with_attribute("alt", ""), Wrapper::image("https://mintter.com/image", ""))]
#[case::image_alt(mark("image", 0, 1).with_attribute("url", "https://mintter.com/image").with_attribute("alt", "hello alt"), Wrapper::image("https://mintter.com/image", "hello alt"))]
#[case::video(mark("video", 0, 1).with_attribute("url", "https://mintter.com/video").with_attribute("alt", ""), Wrapper::video("https://mintter.com/video", ""))]
#[case::embed(embed("mintter://doc1/block1", 0, 1), Wrapper::embed("mintter://doc1/block1"))]
#[case::file(mark("file", 0, 1).with_attribute("url", "f.pdf").with_attribute("name", "f"), Wrapper::file("f.pdf", "f"))]
fn lone_media(#[case] annotation: Annotation, #[case] expected: Wrapper) {
    assert_eq!(
        children("\u{FFFC}", vec![annotation]),
        vec![gap(), expected.into(), gap()]
    );
}

#[test]
fn media_between_text() {
    let out = children(
        "hello block with \u{FFFC} this image in between content",
        vec![
            mark("image", 17, 18)
                .with_attribute("url", "https://mintter.com/image")
                .with_attribute("alt", ""),
        ],
    );
    assert_eq!(
        out,
        vec![
            Leaf::new("hello block with ").into(),
            Wrapper::image("https://mintter.com/image", "").into(),
            gap(),
            Leaf::new(" this image in between content").into(),
        ]
    );
}

#[test]
fn adjacent_embeds() {
    assert_eq!(
        children(
            "\u{FFFC}\u{FFFC}",
            vec![
                embed("mintter://doc1/block1", 0, 1),
                embed("mintter://doc2/block2", 1, 2)
            ]
        ),
        vec![
            gap(),
            Wrapper::embed("mintter://doc1/block1").into(),
            gap(),
            Wrapper::embed("mintter://doc2/block2").into(),
            gap(),
        ]
    );
}

#[test]
fn embeds_separated_by_marks() {
    let out = children(
        "This \u{FFFC} and also this are very important: \u{FFFC}",
        vec![
            embed("mintter://doc1/block1", 5, 6),
            mark("strong", 30, 41),
            embed("mintter://doc2/block2", 41, 42),
        ],
    );
    assert_eq!(
        out,
        vec![
            Leaf::new("This ").into(),
            Wrapper::embed("mintter://doc1/block1").into(),
            gap(),
            Leaf::new(" and also this are very ").into(),
            Leaf::new("important: ").with(StyleFlag::Strong).into(),
            Wrapper::embed("mintter://doc2/block2").into(),
            gap(),
        ]
    );
}

#[test]
fn block_attributes_pass_through() {
    let mut block = Block::new("blockId", "x");
    block
        .attributes
        .insert("childrenType".into(), "group".into());
    block.revision = Some("bafy-rev".into());

    let tree = deserialize(&block).unwrap();
    assert_eq!(tree.attributes, block.attributes);
    assert_eq!(tree.revision, block.revision);
}

#[rstest]
#[case::length_mismatch(
    Annotation { ends: vec![], ..mark("strong", 0, 1) },
    MalformedReason::LengthMismatch { starts: 1, ends: 0 }
)]
#[case::empty_span(mark("strong", 1, 1), MalformedReason::EmptySpan { index: 0, start: 1, end: 1 })]
#[case::unsorted(mark("strong", 2, 3).with_span(0, 1), MalformedReason::Unsorted { index: 1 })]
#[case::out_of_bounds(mark("strong", 0, 4), MalformedReason::OutOfBounds { index: 0, end: 4, len: 3 })]
fn malformed_spans_are_rejected(#[case] annotation: Annotation, #[case] reason: MalformedReason) {
    let block = Block {
        annotations: vec![annotation],
        ..Block::new("blockId", "abc")
    };
    assert_eq!(
        deserialize(&block),
        Err(CodecError::MalformedAnnotation {
            kind: "strong".into(),
            reason,
        })
    );
}

#[test]
fn offsets_past_a_multibyte_text_are_caught() {
    // 3 code points, 12 UTF-8 bytes
    let block = Block {
        annotations: vec![mark("strong", 0, 4)],
        ..Block::new("blockId", "\u{1F600}\u{1F600}\u{1F600}")
    };
    assert!(matches!(
        deserialize(&block),
        Err(CodecError::MalformedAnnotation {
            reason: MalformedReason::OutOfBounds { len: 3, .. },
            ..
        })
    ));
}
