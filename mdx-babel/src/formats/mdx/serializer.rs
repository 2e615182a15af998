//! Block serializer (document tree → MDX)
//!
//! Top-level blocks are joined by a blank line and the result is trimmed at
//! the document boundaries. Lists are emitted marker line first: the first
//! content of an item shares the marker line, later content sits at the item's
//! continuation indent, and nested lists are rendered by the recursive call at
//! the deeper indent and appended as they are. This is the exact inverse of
//! the parser's frame resolution, so a parsed document survives
//! serialize → parse unchanged.
//!
//! Paragraph text can spell out a complete media tag when it was soft-wrapped
//! from lines that were each rejected as embeds. Such a line is broken at a
//! single space into two lines that both read back as text, and the parser
//! joins them again with that one space.

use super::inline::serialize_inlines;
use super::parser::{continues_text, is_media_line};
use crate::common::attributes::{json_number_literal, json_string_literal};
use crate::common::media::{IMAGE_COMPONENT, VIDEO_COMPONENT};
use crate::ir::nodes::{Block, CodeBlock, Document, Heading, ImageFigure, List, VideoEmbed};

/// Spaces per list nesting level.
pub const LIST_INDENT: usize = 2;

/// Serialize a document tree to MDX.
pub fn serialize_document(doc: &Document) -> String {
    let rendered: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| block_lines(block).join("\n"))
        .filter(|text| !text.trim().is_empty())
        .collect();
    tracing::debug!(
        blocks = doc.blocks.len(),
        emitted = rendered.len(),
        "serialized mdx document"
    );
    rendered.join("\n\n").trim().to_string()
}

/// Render one block as its lines, without any list indentation.
///
/// Unknown node kinds render as no lines at all.
fn block_lines(block: &Block) -> Vec<String> {
    match block {
        Block::Paragraph(paragraph) => paragraph_lines(&serialize_inlines(&paragraph.content)),
        Block::Heading(heading) => heading_lines(heading),
        Block::CodeBlock(code) => code_lines(code),
        Block::BulletList(list) => list_lines(list, false, 0),
        Block::OrderedList(list) => list_lines(list, true, 0),
        Block::ImageFigure(image) => vec![image_tag(image)],
        Block::VideoEmbed(video) => vec![video_tag(video)],
        Block::Unsupported => Vec::new(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn paragraph_lines(text: &str) -> Vec<String> {
    split_lines(text).into_iter().flat_map(break_tag_text).collect()
}

/// Split a text line that would read back as a media tag.
fn break_tag_text(line: String) -> Vec<String> {
    if !is_media_line(line.trim()) {
        return vec![line];
    }
    for (at, _) in line.match_indices(' ').rev() {
        let (head, tail) = (&line[..at], &line[at + 1..]);
        let single_space = !head.ends_with(char::is_whitespace)
            && !tail.starts_with(char::is_whitespace);
        if single_space && !is_media_line(head.trim()) && continues_text(tail) {
            return vec![head.to_string(), tail.to_string()];
        }
    }
    tracing::debug!(line = %line, "no safe break for tag-shaped paragraph text");
    vec![line]
}

/// A heading is a single line; hard breaks collapse to spaces. A heading
/// with no text has no markup form and is dropped.
fn heading_lines(heading: &Heading) -> Vec<String> {
    let text = serialize_inlines(&heading.content).replace("  \n", " ");
    if text.trim().is_empty() {
        return Vec::new();
    }
    let hashes = "#".repeat(usize::from(heading.level.clamp(1, 4)));
    vec![format!("{hashes} {text}")]
}

fn code_lines(code: &CodeBlock) -> Vec<String> {
    let language = code.language.as_deref().unwrap_or_default();
    split_lines(&format!("```{language}\n{}\n```", code.text))
}

fn list_lines(list: &List, ordered: bool, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let continuation = " ".repeat(indent + LIST_INDENT);
    let mut lines = Vec::new();

    for (index, item) in list.items.iter().enumerate() {
        let marker = if ordered {
            format!("{pad}{}.", index + 1)
        } else {
            format!("{pad}-")
        };
        let mut marker_emitted = false;

        for child in &item.children {
            if let Some((nested_ordered, nested)) = child.as_list() {
                if !marker_emitted {
                    lines.push(marker.clone());
                    marker_emitted = true;
                }
                lines.extend(list_lines(nested, nested_ordered, indent + LIST_INDENT));
                continue;
            }

            let child_lines = block_lines(child);
            if child_lines.iter().all(|line| line.trim().is_empty()) {
                if !marker_emitted {
                    lines.push(marker.clone());
                    marker_emitted = true;
                }
                continue;
            }

            for line in child_lines {
                if !marker_emitted {
                    lines.push(format!("{marker} {line}"));
                    marker_emitted = true;
                } else if line.is_empty() {
                    lines.push(line);
                } else {
                    lines.push(format!("{continuation}{line}"));
                }
            }
        }

        if !marker_emitted {
            lines.push(marker);
        }
    }

    lines
}

fn image_tag(image: &ImageFigure) -> String {
    let mut attrs = vec![format!("src={}", json_string_literal(&image.src))];
    if !image.alt.is_empty() {
        attrs.push(format!("alt={}", json_string_literal(&image.alt)));
    }
    if !image.caption.is_empty() {
        attrs.push(format!("caption={}", json_string_literal(&image.caption)));
    }
    if let Some(width) = image.width {
        attrs.push(format!("width={{{width}}}"));
    }
    format!("<{IMAGE_COMPONENT} {} />", attrs.join(" "))
}

fn video_tag(video: &VideoEmbed) -> String {
    let mut attrs = vec![format!("src={}", json_string_literal(&video.src))];
    if !video.title.is_empty() {
        attrs.push(format!("title={}", json_string_literal(&video.title)));
    }
    attrs.push(format!(
        "provider={}",
        json_string_literal(video.provider.as_str())
    ));
    attrs.push(format!(
        "aspectRatio={}",
        json_number_literal(video.aspect_ratio)
    ));
    format!("<{VIDEO_COMPONENT} {} />", attrs.join(" "))
}
