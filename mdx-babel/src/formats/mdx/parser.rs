//! Block parser (MDX → document tree)
//!
//! The document is consumed one physical line at a time. State carried across
//! lines:
//!
//! - a paragraph buffer (soft-wrapped lines, joined with a space on flush),
//! - an optional open code fence with its language and verbatim body,
//! - a stack of open list frames, each holding its items under construction.
//!
//! Every line lands in exactly one bucket, checked in this order: fence
//! toggle, code body, blank line, media tag, heading, list marker, text.
//! Nothing is ever rejected; unrecognised syntax becomes paragraph text.
//!
//! # List Frames
//!
//! Lists nest by indentation (two spaces per level in serialized output, any
//! deeper indent on input). A marker line at indent `n` first pops every frame
//! that is deeper than `n`, or at `n` with the other orderedness. Each popped
//! frame becomes a list block attached to the last item of the frame below it,
//! or to the document when the stack runs empty. If the remaining top frame is
//! shallower than `n` (or there is none) a new frame is pushed; otherwise the
//! top frame is reused. The new item is appended to the resulting frame.
//!
//! ```text
//! - parent          push frame(indent 0), item "parent"
//!   - child         push frame(indent 2) under "parent"
//!   more            pop frame(2) into "parent", text joins "parent"
//! Tail              close all frames, start a paragraph
//! ```
//!
//! Indented text and media lines continue the item of the deepest frame that
//! is shallower than the line. Unindented text and any blank line close all
//! open lists.

use super::inline::tokenize;
use crate::common::attributes::parse_tag;
use crate::common::media::{
    normalize_image, normalize_video, MediaOptions, IMAGE_COMPONENT, VIDEO_COMPONENT,
};
use crate::ir::nodes::{Block, CodeBlock, Document, Heading, ListItem};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,4})\s+(.*)$").expect("valid regex for headings"));
static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-(?:\s+(.*))?$").expect("valid regex for bullet markers"));
static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(?:\s+(.*))?$").expect("valid regex for ordered markers"));

const FENCE: &str = "```";

/// Parse MDX source into a document tree.
pub fn parse_document(source: &str, options: &MediaOptions) -> Document {
    let mut parser = BlockParser::new(options);
    let mut line_count = 0usize;
    for line in source.lines() {
        parser.feed(line);
        line_count += 1;
    }
    let doc = parser.finish();
    tracing::debug!(
        lines = line_count,
        blocks = doc.blocks.len(),
        "parsed mdx document"
    );
    doc
}

/// Resolve a trimmed line to a media block, if it is a valid embed.
///
/// Rejected embeds return `None` so the caller keeps the line as text.
fn media_block(line: &str, options: &MediaOptions) -> Option<Block> {
    if let Some(attrs) = parse_tag(line, IMAGE_COMPONENT) {
        return normalize_image(&attrs, options).map(Block::ImageFigure);
    }
    let attrs = parse_tag(line, VIDEO_COMPONENT)?;
    normalize_video(&attrs, options).map(Block::VideoEmbed)
}

/// Whether a trimmed line is read as a media embed under any media options.
///
/// Width and aspect ratio settings only shape the node; they never decide
/// whether the tag is accepted.
pub(crate) fn is_media_line(line: &str) -> bool {
    media_block(line, &MediaOptions::default()).is_some()
}

/// Whether `raw`, following a line of paragraph text, is read as more of
/// that paragraph rather than opening a block of its own.
pub(crate) fn continues_text(raw: &str) -> bool {
    let line = raw.trim();
    !line.is_empty()
        && !raw.trim_start().starts_with(FENCE)
        && !is_media_line(line)
        && !HEADING.is_match(line)
        && list_marker(line).is_none()
}

/// Match a trimmed line against the list markers: `(ordered, content)`.
fn list_marker(line: &str) -> Option<(bool, &str)> {
    if let Some(captures) = BULLET_MARKER.captures(line) {
        let content = captures.get(1).map_or("", |m| m.as_str());
        return Some((false, content.trim()));
    }
    let captures = ORDERED_MARKER.captures(line)?;
    let content = captures.get(2).map_or("", |m| m.as_str());
    Some((true, content.trim()))
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// A list item under construction.
///
/// `lines` is the item's pending paragraph; it is flushed into `children`
/// whenever a block is attached so the children keep source order.
#[derive(Debug, Default)]
struct ItemBuffer {
    lines: Vec<String>,
    children: Vec<Block>,
}

impl ItemBuffer {
    fn from_marker_content(content: &str, options: &MediaOptions) -> Self {
        let mut item = ItemBuffer::default();
        if let Some(block) = media_block(content, options) {
            item.children.push(block);
        } else if !content.is_empty() {
            item.lines.push(content.to_string());
        }
        item
    }

    fn flush_lines(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let text = self.lines.join(" ");
        self.lines.clear();
        self.children.push(Block::paragraph(tokenize(&text)));
    }

    fn push_block(&mut self, block: Block) {
        self.flush_lines();
        self.children.push(block);
    }

    /// Attach a finished nested list. Two lists of the same kind cannot be
    /// told apart in markup once adjacent, so they are merged here.
    fn attach_list(&mut self, ordered: bool, items: Vec<ListItem>) {
        self.flush_lines();
        match self.children.last_mut() {
            Some(Block::OrderedList(list)) if ordered => list.items.extend(items),
            Some(Block::BulletList(list)) if !ordered => list.items.extend(items),
            _ => self.children.push(Block::list(ordered, items)),
        }
    }

    fn finish(mut self) -> ListItem {
        self.flush_lines();
        if self.children.is_empty() {
            // A marker-only line is still an item.
            self.children.push(Block::paragraph(Vec::new()));
        }
        ListItem::new(self.children)
    }
}

#[derive(Debug)]
struct ListFrame {
    ordered: bool,
    indent: usize,
    items: Vec<ItemBuffer>,
}

#[derive(Debug)]
struct CodeFence {
    language: Option<String>,
    lines: Vec<String>,
}

impl CodeFence {
    fn open(info: &str) -> Self {
        let info = info.trim();
        CodeFence {
            language: (!info.is_empty()).then(|| info.to_string()),
            lines: Vec::new(),
        }
    }

    fn finish(self) -> Block {
        Block::CodeBlock(CodeBlock {
            language: self.language,
            text: self.lines.join("\n"),
        })
    }
}

struct BlockParser<'a> {
    options: &'a MediaOptions,
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    code: Option<CodeFence>,
    lists: Vec<ListFrame>,
}

impl<'a> BlockParser<'a> {
    fn new(options: &'a MediaOptions) -> Self {
        BlockParser {
            options,
            blocks: Vec::new(),
            paragraph: Vec::new(),
            code: None,
            lists: Vec::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        if let Some(info) = raw.trim_start().strip_prefix(FENCE) {
            match self.code.take() {
                Some(fence) => self.blocks.push(fence.finish()),
                None => {
                    self.flush_paragraph();
                    self.close_lists();
                    self.code = Some(CodeFence::open(info));
                }
            }
            return;
        }

        if let Some(fence) = self.code.as_mut() {
            fence.lines.push(raw.to_string());
            return;
        }

        let line = raw.trim();
        if line.is_empty() {
            self.flush_paragraph();
            self.close_lists();
            return;
        }

        let indent = leading_spaces(raw);

        if let Some(block) = media_block(line, self.options) {
            self.place_block(indent, block);
            return;
        }

        if let Some(captures) = HEADING.captures(line) {
            self.flush_paragraph();
            self.close_lists();
            let level = captures[1].len() as u8;
            let text = captures[2].trim();
            self.blocks.push(Block::Heading(Heading {
                level,
                content: tokenize(text),
            }));
            return;
        }

        if let Some((ordered, content)) = list_marker(line) {
            self.open_item(indent, ordered, content);
            return;
        }

        self.push_text(indent, line);
    }

    fn finish(mut self) -> Document {
        self.flush_paragraph();
        self.close_lists();
        if let Some(fence) = self.code.take() {
            self.blocks.push(fence.finish());
        }
        Document::new(self.blocks)
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.blocks.push(Block::paragraph(tokenize(&text)));
    }

    /// Place a media block: as a child of the open item it continues, or at
    /// the top level.
    fn place_block(&mut self, indent: usize, block: Block) {
        if indent > 0 && !self.lists.is_empty() {
            self.close_frames_at_or_deeper(indent);
            if let Some(item) = self.current_item() {
                item.push_block(block);
                return;
            }
        }
        self.flush_paragraph();
        self.close_lists();
        self.blocks.push(block);
    }

    fn push_text(&mut self, indent: usize, text: &str) {
        if !self.lists.is_empty() {
            if indent > 0 {
                self.close_frames_at_or_deeper(indent);
                if let Some(item) = self.current_item() {
                    item.lines.push(text.to_string());
                    return;
                }
            } else {
                self.close_lists();
            }
        }
        self.paragraph.push(text.to_string());
    }

    fn open_item(&mut self, indent: usize, ordered: bool, content: &str) {
        self.flush_paragraph();

        while let Some(top) = self.lists.last() {
            if top.indent > indent || (top.indent == indent && top.ordered != ordered) {
                self.pop_frame();
            } else {
                break;
            }
        }

        let reuse = matches!(self.lists.last(), Some(top) if top.indent == indent);
        if !reuse {
            tracing::trace!(indent, ordered, depth = self.lists.len(), "open list frame");
            self.lists.push(ListFrame {
                ordered,
                indent,
                items: Vec::new(),
            });
        }

        let item = ItemBuffer::from_marker_content(content, self.options);
        if let Some(frame) = self.lists.last_mut() {
            frame.items.push(item);
        }
    }

    fn current_item(&mut self) -> Option<&mut ItemBuffer> {
        self.lists.last_mut().and_then(|frame| frame.items.last_mut())
    }

    /// Pop the top frame and attach its list to the enclosing item, or to the
    /// document when no frame remains.
    fn pop_frame(&mut self) {
        let Some(frame) = self.lists.pop() else {
            return;
        };
        tracing::trace!(
            indent = frame.indent,
            ordered = frame.ordered,
            items = frame.items.len(),
            "close list frame"
        );
        let items: Vec<ListItem> = frame.items.into_iter().map(ItemBuffer::finish).collect();
        match self.current_item() {
            Some(parent) => parent.attach_list(frame.ordered, items),
            None => self.blocks.push(Block::list(frame.ordered, items)),
        }
    }

    fn close_frames_at_or_deeper(&mut self, indent: usize) {
        while self.lists.last().is_some_and(|top| top.indent >= indent) {
            self.pop_frame();
        }
    }

    fn close_lists(&mut self) {
        while !self.lists.is_empty() {
            self.pop_frame();
        }
    }
}
