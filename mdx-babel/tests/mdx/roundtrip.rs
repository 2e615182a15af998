//! Round-trip tests: `parse(serialize(parse(s))) == parse(s)`

use crate::common::{fixture, kinds};
use mdx_babel::{parse, round_trip_stable, serialize};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn assert_stable(source: &str) {
    let first = parse(source);
    let second = parse(&serialize(&first));
    assert_eq!(second, first, "round trip changed the tree for {source:?}");
}

#[test]
fn test_kitchensink_round_trip() {
    assert_stable(&fixture("kitchensink.mdx"));
}

#[test]
fn test_export_is_a_fixed_point() {
    let once = serialize(&parse(&fixture("kitchensink.mdx")));
    let twice = serialize(&parse(&once));
    assert_eq!(twice, once);
}

#[test]
fn test_mixed_embeds_lists_and_paragraphs_keep_order() {
    let source = "- one\n- two\n\
                  <ImageFigure src=\"https://cdn.example.com/a.png\" alt=\"A\" />\n\
                  Between the embeds.\n\
                  <VideoEmbed src=\"https://youtu.be/abc123\" />\n\
                  - three";
    let expected = vec!["BulletList", "ImageFigure", "Paragraph", "VideoEmbed", "BulletList"];

    let first = parse(source);
    assert_eq!(kinds(&first.blocks), expected);

    let second = parse(&serialize(&first));
    assert_eq!(kinds(&second.blocks), expected);
    assert_eq!(second, first);
}

#[test]
fn test_list_shapes_round_trip() {
    for source in [
        "- parent\n  - child\nTail",
        "1. a\n2. b\n\n1. c",
        "- a\n  1. one\n  - mixed",
        "-\n  - only nested",
        "- a\n  <VideoEmbed src=\"https://vimeo.com/42\" />\n  after",
        "    - deep first\n- shallow",
        "-\n-\n- ",
        "- item\n```\ncode\n```",
    ] {
        assert_stable(source);
    }
}

#[test]
fn test_degraded_content_round_trips() {
    for source in [
        "<ImageFigure src=\"ftp://x/y.png\" />",
        "##### Too Deep",
        "**unterminated and `open",
        "<VideoEmbed src=\"https://example.com/v/1\" />",
        "```\nunterminated fence",
    ] {
        assert!(round_trip_stable(source), "not stable: {source:?}");
    }
}

#[test]
fn test_wrapped_tag_text_stays_text() {
    for source in [
        "<ImageFigure src=\"https://x.io/a.png\"\n/>",
        "- <VideoEmbed src=\"https://youtu.be/abc\"\n  />",
        "1. intro\n  <ImageFigure\n  src=\"https://x.io/a.png\" />",
        "<ImageFigure src=\"https://x.io/a.png\"\n/>\n/>",
    ] {
        let first = parse(source);
        assert!(
            !kinds(&first.blocks).contains(&"ImageFigure"),
            "tag text became an embed in {source:?}"
        );
        assert_stable(source);
    }
}

const FRAGMENTS: &[&str] = &[
    "plain text",
    "**bold** words",
    "*it* and `code`",
    "",
    "# Heading",
    "#### Small",
    "##### deep",
    "- bullet",
    "  - nested",
    "    - deeper",
    "1. one",
    "  2. two",
    "-",
    "  continuation",
    "<ImageFigure src=\"https://cdn.example.com/x.png\" width={900} />",
    "  <VideoEmbed src=\"https://youtu.be/abc\" title=\"t\" />",
    "<ImageFigure src=\"ftp://x/y.png\" />",
    "<ImageFigure src=\"https://cdn.example.com/x.png\"",
    "- <VideoEmbed src=\"https://youtu.be/abc\"",
    "/>",
    "  />",
    "```rust",
    "```",
    "let x = 1;",
];

fn document_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..24)
        .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn prop_round_trip_is_stable(source in document_source()) {
        let first = parse(&source);
        let second = parse(&serialize(&first));
        prop_assert_eq!(second, first);
    }
}
