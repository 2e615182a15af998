//! Treeviz formatter for document trees
//!
//! Treeviz is a visual representation of the tree, meant for inspecting what
//! the MDX parser made of a post. One line per node:
//!
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ Document (3 blocks)
//! ├─ ⊤ h2 Getting started
//! ├─ ☰ 2 items
//! │ ├─ • -
//! │ │ └─ ¶ Install the toolchain and th…
//! │ └─ • -
//! │   └─ ¶ Run it
//! └─ ▶ youtube https://www.youtube.com/…
//!
//! Icons
//!     Document: ⧉
//!     Paragraph: ¶
//!     Heading: ⊤
//!     CodeBlock: 𝒱
//!     BulletList: ☰
//!     OrderedList: №
//!     ListItem: •
//!     ImageFigure: ▣
//!     VideoEmbed: ▶
//!     Unsupported: ○
//!     With marks shown, paragraph and heading runs appear as children:
//!         Text: ◦
//!         HardBreak: ↵

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::mdx::inline::plain_text;
use crate::ir::nodes::{Block, Document, Inline, ListItem, Mark};

const LABEL_WIDTH: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let head: String = label.chars().take(LABEL_WIDTH).collect();
        format!("{head}…")
    }
}

fn block_label(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => plain_text(&p.content),
        Block::Heading(h) => format!("h{} {}", h.level, plain_text(&h.content)),
        Block::CodeBlock(c) => {
            let lines = if c.text.is_empty() {
                0
            } else {
                c.text.lines().count()
            };
            format!(
                "{} ({} lines)",
                c.language.as_deref().unwrap_or("plain"),
                lines
            )
        }
        Block::BulletList(l) | Block::OrderedList(l) => format!("{} items", l.items.len()),
        Block::ImageFigure(img) => img.src.clone(),
        Block::VideoEmbed(v) => format!("{} {}", v.provider.as_str(), v.src),
        Block::Unsupported => "unsupported".to_string(),
    }
}

fn inline_line(inline: &Inline) -> (&'static str, String) {
    match inline {
        Inline::Text { text, marks } => {
            let mut label = truncate(text);
            if !marks.is_empty() {
                let names: Vec<&str> = marks
                    .iter()
                    .map(|m| match m {
                        Mark::Bold => "bold",
                        Mark::Italic => "italic",
                        Mark::Code => "code",
                    })
                    .collect();
                label.push_str(&format!(" [{}]", names.join(", ")));
            }
            (get_icon("Text"), label)
        }
        Inline::HardBreak => (get_icon("HardBreak"), "break".to_string()),
    }
}

struct Writer {
    output: String,
    show_marks: bool,
}

impl Writer {
    fn line(&mut self, prefix: &str, is_last: bool, icon: &str, label: &str) -> String {
        let connector = if is_last { "└─" } else { "├─" };
        self.output
            .push_str(&format!("{prefix}{connector} {icon} {label}\n"));
        format!("{}{}", prefix, if is_last { "  " } else { "│ " })
    }

    fn blocks(&mut self, blocks: &[Block], prefix: &str) {
        let count = blocks.len();
        for (i, block) in blocks.iter().enumerate() {
            self.block(block, prefix, i == count - 1);
        }
    }

    fn block(&mut self, block: &Block, prefix: &str, is_last: bool) {
        let label = truncate(&block_label(block));
        let child_prefix = self.line(prefix, is_last, get_icon(block.kind()), &label);

        match block {
            Block::Paragraph(p) if self.show_marks => self.inlines(&p.content, &child_prefix),
            Block::Heading(h) if self.show_marks => self.inlines(&h.content, &child_prefix),
            Block::BulletList(list) | Block::OrderedList(list) => {
                let ordered = matches!(block, Block::OrderedList(_));
                let count = list.items.len();
                for (i, item) in list.items.iter().enumerate() {
                    self.item(item, ordered, i, &child_prefix, i == count - 1);
                }
            }
            _ => {}
        }
    }

    fn item(&mut self, item: &ListItem, ordered: bool, index: usize, prefix: &str, is_last: bool) {
        let marker = if ordered {
            format!("{}.", index + 1)
        } else {
            "-".to_string()
        };
        let child_prefix = self.line(prefix, is_last, get_icon("ListItem"), &marker);
        self.blocks(&item.children, &child_prefix);
    }

    fn inlines(&mut self, inlines: &[Inline], prefix: &str) {
        let count = inlines.len();
        for (i, inline) in inlines.iter().enumerate() {
            let (icon, label) = inline_line(inline);
            self.line(prefix, i == count - 1, icon, &label);
        }
    }
}

/// Convert a document to a treeviz string.
pub fn to_treeviz_str(doc: &Document, show_marks: bool) -> String {
    let mut writer = Writer {
        output: format!(
            "{} Document ({} blocks)\n",
            get_icon("Document"),
            doc.blocks.len()
        ),
        show_marks,
    };
    writer.blocks(&doc.blocks, "");
    writer.output
}

/// Format implementation for treeviz format
#[derive(Debug, Clone)]
pub struct TreevizFormat {
    pub show_marks: bool,
}

impl Default for TreevizFormat {
    fn default() -> Self {
        Self { show_marks: true }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with box-drawing connectors and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc, self.show_marks))
    }
}
