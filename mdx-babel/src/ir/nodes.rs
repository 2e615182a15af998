//! Core data structures for the document tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A top-level or list-item-level structural unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    CodeBlock(CodeBlock),
    BulletList(List),
    OrderedList(List),
    ImageFigure(ImageFigure),
    VideoEmbed(VideoEmbed),
    /// A node kind this version does not know about. Kept so that trees from
    /// newer editors still load; it serializes to nothing.
    #[serde(other)]
    Unsupported,
}

impl Block {
    /// Node kind name, used by the inspection formats and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "Paragraph",
            Block::Heading(_) => "Heading",
            Block::CodeBlock(_) => "CodeBlock",
            Block::BulletList(_) => "BulletList",
            Block::OrderedList(_) => "OrderedList",
            Block::ImageFigure(_) => "ImageFigure",
            Block::VideoEmbed(_) => "VideoEmbed",
            Block::Unsupported => "Unsupported",
        }
    }

    /// Builds a list block of the requested kind.
    pub fn list(ordered: bool, items: Vec<ListItem>) -> Self {
        if ordered {
            Block::OrderedList(List { items })
        } else {
            Block::BulletList(List { items })
        }
    }

    /// Returns `(ordered, list)` when this block is a list.
    pub fn as_list(&self) -> Option<(bool, &List)> {
        match self {
            Block::BulletList(list) => Some((false, list)),
            Block::OrderedList(list) => Some((true, list)),
            _ => None,
        }
    }

    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph(Paragraph { content })
    }
}

/// Represents a paragraph of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub content: Vec<Inline>,
}

/// Represents a heading. The parser only ever builds levels 1 through 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    #[serde(default)]
    pub content: Vec<Inline>,
}

/// Represents a fenced code block. `text` is raw and never tokenized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Represents a list of items. Orderedness lives on the enclosing [`Block`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub items: Vec<ListItem>,
}

/// Represents an item in a list: an ordered sequence of child blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub children: Vec<Block>,
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

/// An image figure embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFigure {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// A video embed. `src` is always a canonical embeddable URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEmbed {
    pub src: String,
    #[serde(default)]
    pub title: String,
    pub provider: VideoProvider,
    pub aspect_ratio: f64,
}

/// Video hosts accepted by the media normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

impl VideoProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoProvider::Youtube => "youtube",
            VideoProvider::Vimeo => "vimeo",
        }
    }
}

/// Character-level style annotation.
///
/// The declaration order is the mark application order (bold, then italic,
/// then code); `Marks` iterates in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Code,
}

pub type Marks = BTreeSet<Mark>;

/// Represents inline content inside a paragraph or heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        marks: Marks,
    },
    HardBreak,
}

impl Inline {
    /// Unmarked text run.
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text {
            text: value.into(),
            marks: Marks::new(),
        }
    }

    /// Text run carrying a single mark.
    pub fn marked(value: impl Into<String>, mark: Mark) -> Self {
        Inline::Text {
            text: value.into(),
            marks: Marks::from([mark]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_iterate_in_application_order() {
        let marks = Marks::from([Mark::Code, Mark::Bold, Mark::Italic]);
        let ordered: Vec<_> = marks.into_iter().collect();
        assert_eq!(ordered, vec![Mark::Bold, Mark::Italic, Mark::Code]);
    }

    #[test]
    fn list_constructor_picks_kind() {
        assert!(matches!(Block::list(true, vec![]), Block::OrderedList(_)));
        assert!(matches!(Block::list(false, vec![]), Block::BulletList(_)));
        assert_eq!(Block::list(true, vec![]).as_list().map(|(o, _)| o), Some(true));
    }
}
