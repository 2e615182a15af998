//! Export tests for the MDX format (tree → MDX)

use crate::common::{bullets, fixture, item, numbered, para, text_item};
use insta::assert_snapshot;
use mdx_babel::format::Format;
use mdx_babel::formats::MdxFormat;
use mdx_babel::ir::nodes::{Block, Document, ImageFigure, Inline, Mark, Marks, VideoEmbed, VideoProvider};
use mdx_babel::{parse, serialize};

#[test]
fn test_kitchensink_export_is_canonical() {
    let out = serialize(&parse(&fixture("kitchensink.mdx")));
    assert_snapshot!(out, @r###"
    # Kitchen Sink

    A paragraph with **bold**, *italic* and `code` spans, soft-wrapped onto a second line.

    ## Lists

    - first bullet
    - second bullet continued on an indented line
      - nested bullet
      - another nested
        1. deep ordered
    - third bullet

    1. starts at three
    2. renumbered on export

    - <ImageFigure src={"https://cdn.example.com/a.png"} alt={"Inline"} />
    -

    ### Media

    <ImageFigure src={"https://cdn.example.com/cover.png"} alt={"Cover"} caption={"It's a \"cover\""} width={1200} />

    <VideoEmbed src={"https://www.youtube.com/embed/dQw4w9WgXcQ"} title={"Demo"} provider={"youtube"} aspectRatio={1.7777777777777777} />

    <VideoEmbed src={"https://player.vimeo.com/video/76979871"} provider={"vimeo"} aspectRatio={1.5} />

    <ImageFigure src="javascript:alert(1)" />

    #### Code

    ```rust
    fn main() {
        println!("**not bold**");
    }
    ```

    ##### Not a heading
    "###);
}

#[test]
fn test_multi_paragraph_item_uses_continuation_indent() {
    let doc = Document::new(vec![numbered(vec![
        item(vec![para("first"), para("second")]),
        text_item("next"),
    ])]);
    assert_eq!(serialize(&doc), "1. first\n  second\n2. next");
}

#[test]
fn test_item_starting_with_nested_list_emits_bare_marker() {
    let doc = Document::new(vec![bullets(vec![item(vec![bullets(vec![
        text_item("inner"),
    ])])])]);
    assert_eq!(serialize(&doc), "-\n  - inner");
}

#[test]
fn test_combined_marks_nest_in_application_order() {
    let marks: Marks = [Mark::Code, Mark::Bold].into_iter().collect();
    let doc = Document::new(vec![Block::paragraph(vec![
        Inline::Text {
            text: "x".to_string(),
            marks,
        },
        Inline::HardBreak,
        Inline::text("y"),
    ])]);
    assert_eq!(serialize(&doc), "`**x**`  \ny");
}

#[test]
fn test_media_attributes_are_json_literals() {
    let doc = Document::new(vec![
        Block::ImageFigure(ImageFigure {
            src: "https://cdn.example.com/q.png?a=1&b=\"2\"".to_string(),
            alt: "a \\ b".to_string(),
            caption: String::new(),
            width: None,
        }),
        Block::VideoEmbed(VideoEmbed {
            src: "https://player.vimeo.com/video/1".to_string(),
            title: "T".to_string(),
            provider: VideoProvider::Vimeo,
            aspect_ratio: 2.0,
        }),
    ]);
    let out = serialize(&doc);
    assert_eq!(
        out,
        "<ImageFigure src={\"https://cdn.example.com/q.png?a=1&b=\\\"2\\\"\"} alt={\"a \\\\ b\"} />\n\n\
         <VideoEmbed src={\"https://player.vimeo.com/video/1\"} title={\"T\"} provider={\"vimeo\"} aspectRatio={2.0} />"
    );
    assert_eq!(parse(&out), doc);
}

#[test]
fn test_unsupported_blocks_leave_no_gap() {
    let doc = Document::new(vec![para("a"), Block::Unsupported, para("b")]);
    assert_eq!(serialize(&doc), "a\n\nb");
}

#[test]
fn test_format_trait_serialize_matches_free_function() {
    let doc = Document::new(vec![para("hello")]);
    let via_trait = MdxFormat::default().serialize(&doc).expect("mdx never fails");
    assert_eq!(via_trait, serialize(&doc));
}
