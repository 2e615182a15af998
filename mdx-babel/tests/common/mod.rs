//! Shared helpers for the integration tests.

use mdx_babel::ir::nodes::{Block, Inline, List, ListItem};
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

pub fn para(text: &str) -> Block {
    Block::paragraph(vec![Inline::text(text)])
}

pub fn item(children: Vec<Block>) -> ListItem {
    ListItem::new(children)
}

pub fn text_item(text: &str) -> ListItem {
    item(vec![para(text)])
}

pub fn bullets(items: Vec<ListItem>) -> Block {
    Block::BulletList(List { items })
}

pub fn numbered(items: Vec<ListItem>) -> Block {
    Block::OrderedList(List { items })
}

/// Kind names of the top-level blocks, for order assertions.
pub fn kinds(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(Block::kind).collect()
}
