//! Import tests for the MDX format (MDX → tree)

use crate::common::{bullets, fixture, item, kinds, numbered, para, text_item};
use mdx_babel::format::Format;
use mdx_babel::formats::MdxFormat;
use mdx_babel::ir::nodes::{Block, CodeBlock, ImageFigure, Inline, Mark, VideoEmbed, VideoProvider};
use mdx_babel::{parse, parse_with_options, MediaOptions};
use pretty_assertions::assert_eq;

#[test]
fn test_list_before_paragraph_needs_no_blank_line() {
    let doc = parse("- item\nNext paragraph");
    assert_eq!(
        doc.blocks,
        vec![bullets(vec![text_item("item")]), para("Next paragraph")]
    );
}

#[test]
fn test_nested_list_closes_before_trailing_content() {
    let doc = parse("- parent\n  - child\nTail");
    assert_eq!(
        doc.blocks,
        vec![
            bullets(vec![item(vec![
                para("parent"),
                bullets(vec![text_item("child")]),
            ])]),
            para("Tail"),
        ]
    );
}

#[test]
fn test_five_hashes_stay_literal() {
    let doc = parse("##### Too Deep");
    assert_eq!(doc.blocks, vec![para("##### Too Deep")]);
}

#[test]
fn test_bare_hashes_stay_literal() {
    for line in ["#", "##", "###", "####"] {
        assert_eq!(parse(line).blocks, vec![para(line)]);
    }
}

#[test]
fn test_ftp_image_stays_visible() {
    let line = r#"<ImageFigure src="ftp://x/y.png" />"#;
    let doc = parse(line);
    assert_eq!(doc.blocks, vec![para(line)]);
}

#[test]
fn test_short_youtube_link_is_canonicalized() {
    let doc = parse(r#"<VideoEmbed src="https://youtu.be/abc123" />"#);
    match doc.blocks.as_slice() {
        [Block::VideoEmbed(video)] => {
            assert_eq!(video.src, "https://www.youtube.com/embed/abc123");
            assert_eq!(video.provider, VideoProvider::Youtube);
            assert!((video.aspect_ratio - 16.0 / 9.0).abs() < 1e-9);
            assert_eq!(video.title, "");
        }
        other => panic!("Expected a single video embed, got {other:?}"),
    }
}

#[test]
fn test_unknown_video_host_stays_visible() {
    let line = r#"<VideoEmbed src="https://evil.example.com/watch?v=abc" />"#;
    assert_eq!(parse(line).blocks, vec![para(line)]);
}

#[test]
fn test_ordered_items_keep_order_and_share_a_list() {
    let doc = parse("1. a\n2. b\n7. c");
    assert_eq!(
        doc.blocks,
        vec![numbered(vec![text_item("a"), text_item("b"), text_item("c")])]
    );
}

#[test]
fn test_inline_marks_in_headings_and_paragraphs() {
    let doc = parse("## The `parse` call\n\nIt is **total** and *pure*.");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading(mdx_babel::ir::nodes::Heading {
                level: 2,
                content: vec![
                    Inline::text("The "),
                    Inline::marked("parse", Mark::Code),
                    Inline::text(" call"),
                ],
            }),
            Block::paragraph(vec![
                Inline::text("It is "),
                Inline::marked("total", Mark::Bold),
                Inline::text(" and "),
                Inline::marked("pure", Mark::Italic),
                Inline::text("."),
            ]),
        ]
    );
}

#[test]
fn test_unterminated_spans_are_literal() {
    let doc = parse("a **b and `c");
    assert_eq!(doc.blocks, vec![para("a **b and `c")]);
}

#[test]
fn test_configured_width_bounds_apply() {
    let options = MediaOptions {
        image_width_min: 100,
        image_width_max: 500,
        ..MediaOptions::default()
    };
    let doc = parse_with_options(
        r#"<ImageFigure src="https://cdn.example.com/a.png" width={50} />"#,
        &options,
    );
    assert_eq!(
        doc.blocks,
        vec![Block::ImageFigure(ImageFigure {
            src: "https://cdn.example.com/a.png".to_string(),
            alt: String::new(),
            caption: String::new(),
            width: Some(100),
        })]
    );
}

#[test]
fn test_format_trait_parse_matches_free_function() {
    let source = "# Title\n\n- one\n- two";
    let via_trait = MdxFormat::default().parse(source).expect("mdx never fails");
    assert_eq!(via_trait, parse(source));
}

#[test]
fn test_kitchensink_structure() {
    let doc = parse(&fixture("kitchensink.mdx"));

    assert_eq!(
        kinds(&doc.blocks),
        vec![
            "Heading",
            "Paragraph",
            "Heading",
            "BulletList",
            "OrderedList",
            "BulletList",
            "Heading",
            "ImageFigure",
            "VideoEmbed",
            "VideoEmbed",
            "Paragraph",
            "Heading",
            "CodeBlock",
            "Paragraph",
        ]
    );

    assert_eq!(
        doc.blocks[3],
        bullets(vec![
            text_item("first bullet"),
            item(vec![
                para("second bullet continued on an indented line"),
                bullets(vec![
                    text_item("nested bullet"),
                    item(vec![
                        para("another nested"),
                        numbered(vec![text_item("deep ordered")]),
                    ]),
                ]),
            ]),
            text_item("third bullet"),
        ])
    );

    assert_eq!(
        doc.blocks[5],
        bullets(vec![
            item(vec![Block::ImageFigure(ImageFigure {
                src: "https://cdn.example.com/a.png".to_string(),
                alt: "Inline".to_string(),
                caption: String::new(),
                width: None,
            })]),
            item(vec![Block::paragraph(vec![])]),
        ])
    );

    assert_eq!(
        doc.blocks[7],
        Block::ImageFigure(ImageFigure {
            src: "https://cdn.example.com/cover.png".to_string(),
            alt: "Cover".to_string(),
            caption: "It's a \"cover\"".to_string(),
            width: Some(1200),
        })
    );

    assert_eq!(
        doc.blocks[8],
        Block::VideoEmbed(VideoEmbed {
            src: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            title: "Demo".to_string(),
            provider: VideoProvider::Youtube,
            aspect_ratio: 16.0 / 9.0,
        })
    );

    assert_eq!(
        doc.blocks[9],
        Block::VideoEmbed(VideoEmbed {
            src: "https://player.vimeo.com/video/76979871".to_string(),
            title: String::new(),
            provider: VideoProvider::Vimeo,
            aspect_ratio: 1.5,
        })
    );

    assert_eq!(
        doc.blocks[12],
        Block::CodeBlock(CodeBlock {
            language: Some("rust".to_string()),
            text: "fn main() {\n    println!(\"**not bold**\");\n}".to_string(),
        })
    );
}
