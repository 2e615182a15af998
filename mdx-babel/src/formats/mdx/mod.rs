//! MDX subset format implementation
//!
//! Bidirectional conversion between the blog editor's MDX dialect and the
//! document tree in [`crate::ir::nodes`].
//!
//! # Element Mapping Table
//!
//! | Tree node      | Markup                                       | Notes                                  |
//! |----------------|----------------------------------------------|----------------------------------------|
//! | Paragraph      | text lines                                   | Soft-wrapped lines join with a space   |
//! | Heading        | `#` … `####`                                 | Five or more `#` stay paragraph text   |
//! | CodeBlock      | ```` ```lang ```` … ```` ``` ````            | Body is verbatim                       |
//! | BulletList     | `- item`                                     | Two spaces per nesting level           |
//! | OrderedList    | `1. item`                                    | Renumbered from 1 on export            |
//! | ImageFigure    | `<ImageFigure src=… alt=… caption=… width={n} />` | http(s) only, width clamped       |
//! | VideoEmbed     | `<VideoEmbed src=… title=… aspectRatio={n} />`    | YouTube/Vimeo, canonical embed URL |
//! | Inline:        |                                              |                                        |
//! |   Bold         | `**bold**`                                   | One mark per span                      |
//! |   Italic       | `*italic*`                                   |                                        |
//! |   Code         | `` `code` ``                                 |                                        |
//! |   HardBreak    | two trailing spaces + newline                | Export only                            |
//!
//! # Lossy Conversions
//!
//! - Whitespace is normalised: paragraphs become one line, blank-line runs collapse.
//! - Ordered list start numbers are not kept.
//! - Hard breaks re-import as a single space.
//! - Adjacent paragraphs inside one list item re-import as one paragraph.
//! - Headings and code blocks inside list items close the list on re-import.
//! - Headings without text are dropped on export.
//! - Paragraph text that spells out a media tag is exported over two lines.
//!
//! The parse → serialize → parse cycle is stable for every parsed document.

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::common::media::MediaOptions;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for the MDX subset
#[derive(Debug, Clone, Default)]
pub struct MdxFormat {
    pub media: MediaOptions,
}

impl MdxFormat {
    pub fn new(media: MediaOptions) -> Self {
        Self { media }
    }
}

impl Format for MdxFormat {
    fn name(&self) -> &str {
        "mdx"
    }

    fn description(&self) -> &str {
        "Markdown subset with ImageFigure/VideoEmbed components"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mdx", "md"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_document(source, &self.media))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_document(doc))
    }
}
