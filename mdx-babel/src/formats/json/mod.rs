//! JSON format: the editor boundary
//!
//! The editor hydrates from, and hands back, the document tree as JSON. Blocks
//! and inline nodes are tagged with a `"type"` field:
//!
//! ```json
//! { "blocks": [
//!   { "type": "heading", "level": 2, "content": [{ "type": "text", "text": "Hi" }] },
//!   { "type": "bulletList", "items": [{ "children": [
//!     { "type": "paragraph", "content": [
//!       { "type": "text", "text": "bold", "marks": ["bold"] }
//!     ] }
//!   ] }] },
//!   { "type": "videoEmbed", "src": "https://www.youtube.com/embed/x",
//!     "title": "", "provider": "youtube", "aspectRatio": 1.7777777777777777 }
//! ] }
//! ```
//!
//! Block kinds this version does not know deserialize as
//! [`Block::Unsupported`](crate::ir::nodes::Block::Unsupported).

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for the JSON document tree
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonFormat {
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document tree as JSON (editor boundary)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::Parse(format!("invalid document JSON: {e}")))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        result.map_err(|e| FormatError::Serialization(format!("JSON encoding failed: {e}")))
    }
}
