//! JSON format tests
//!
//! The JSON shape is the contract with the editor, so these pin it down.

use crate::common::{bullets, fixture, para, text_item};
use insta::assert_snapshot;
use mdx_babel::format::Format;
use mdx_babel::formats::JsonFormat;
use mdx_babel::ir::nodes::{Block, Document, ImageFigure, VideoEmbed, VideoProvider};
use mdx_babel::{parse, FormatError, FormatRegistry};
use pretty_assertions::assert_eq;

#[test]
fn test_pretty_output_shape() {
    let doc = Document::new(vec![
        bullets(vec![text_item("a")]),
        Block::VideoEmbed(VideoEmbed {
            src: "https://www.youtube.com/embed/x".to_string(),
            title: String::new(),
            provider: VideoProvider::Youtube,
            aspect_ratio: 1.5,
        }),
    ]);
    let json = JsonFormat::default().serialize(&doc).expect("encodes");
    assert_snapshot!(json, @r###"
    {
      "blocks": [
        {
          "type": "bulletList",
          "items": [
            {
              "children": [
                {
                  "type": "paragraph",
                  "content": [
                    {
                      "type": "text",
                      "text": "a"
                    }
                  ]
                }
              ]
            }
          ]
        },
        {
          "type": "videoEmbed",
          "src": "https://www.youtube.com/embed/x",
          "title": "",
          "provider": "youtube",
          "aspectRatio": 1.5
        }
      ]
    }
    "###);
}

#[test]
fn test_image_width_is_omitted_when_absent() {
    let doc = Document::new(vec![Block::ImageFigure(ImageFigure {
        src: "https://cdn.example.com/a.png".to_string(),
        alt: String::new(),
        caption: String::new(),
        width: None,
    })]);
    let json = JsonFormat::compact().serialize(&doc).expect("encodes");
    assert_eq!(
        json,
        r#"{"blocks":[{"type":"imageFigure","src":"https://cdn.example.com/a.png","alt":"","caption":""}]}"#
    );
}

#[test]
fn test_editor_tree_with_unknown_nodes_still_exports() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry
        .parse(
            r#"{"blocks":[
                {"type":"paragraph","content":[{"type":"text","text":"kept"}]},
                {"type":"horizontalRule"},
                {"type":"paragraph","content":[{"type":"text","text":"also kept"}]}
            ]}"#,
            "json",
        )
        .expect("decodes");
    assert_eq!(
        doc.blocks,
        vec![para("kept"), Block::Unsupported, para("also kept")]
    );
    assert_eq!(
        registry.serialize(&doc, "mdx").expect("exports"),
        "kept\n\nalso kept"
    );
}

#[test]
fn test_missing_optional_fields_take_defaults() {
    let doc = JsonFormat::default()
        .parse(r#"{"blocks":[{"type":"imageFigure","src":"https://a.example/b.png"}]}"#)
        .expect("decodes");
    assert_eq!(
        doc.blocks,
        vec![Block::ImageFigure(ImageFigure {
            src: "https://a.example/b.png".to_string(),
            alt: String::new(),
            caption: String::new(),
            width: None,
        })]
    );
}

#[test]
fn test_malformed_json_is_reported() {
    let result = JsonFormat::default().parse(r#"{"blocks": [ {"type": "paragraph" "#);
    assert!(matches!(result, Err(FormatError::Parse(_))));
}

#[test]
fn test_kitchensink_survives_json_boundary() {
    let doc = parse(&fixture("kitchensink.mdx"));
    let format = JsonFormat::default();
    let json = format.serialize(&doc).expect("encodes");
    assert_eq!(format.parse(&json).expect("decodes"), doc);
}
