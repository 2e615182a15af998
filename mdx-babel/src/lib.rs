//! MDX interoperability for the blog editor
//!
//!     This crate converts between the MDX subset the blog stores posts in and the structured
//!     document tree the rich-text editor works on. It is a pure lib: it powers mdx-cli but
//!     never assumes a shell environment (no printing, no env vars, no subscriber install).
//!
//!     TLDR: For format authors:
//!         - Formats convert to and from the tree in ./ir/nodes.rs, nothing else.
//!         - Shared mapping code (component tags, media normalization) lives in ./common.
//!         - MDX import never fails: anything it cannot read becomes a paragraph.
//!         - Every element mapping gets unit tests next to the parser and serializer, and the
//!           round-trip property is tested over the kitchensink fixture and with proptest.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── mdx
//!     │   │   ├── inline.rs       # Span tokenizer and inline serializer
//!     │   │   ├── parser.rs       # Line-oriented block parser
//!     │   │   ├── serializer.rs   # Tree to markup
//!     │   │   └── mod.rs
//!     │   ├── json                # Editor boundary
//!     │   └── treeviz             # Inspection output
//!     ├── ir                      # The document tree
//!     └── common                  # Tag attributes and media normalization
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── mdx
//!     │   ├── import.rs
//!     │   ├── export.rs
//!     │   └── roundtrip.rs
//!     ├── json
//!     └── fixtures
//!         └── kitchensink.mdx
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Round trips
//!
//!     The tree is the source of truth. Export is canonical, so for any markup `s`,
//!     `parse(serialize(parse(s))) == parse(s)` holds, while the text itself may be normalized
//!     (ordered lists renumbered from 1, attributes reordered, blank lines collapsed).

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod ir;

pub use common::media::MediaOptions;
pub use error::FormatError;
pub use format::Format;
pub use formats::{JsonFormat, MdxFormat, TreevizFormat};
pub use ir::nodes::Document;
pub use registry::FormatRegistry;

/// Parse MDX markup into a document tree with the default media bounds.
pub fn parse(source: &str) -> Document {
    parse_with_options(source, &MediaOptions::default())
}

/// Parse MDX markup into a document tree.
pub fn parse_with_options(source: &str, options: &MediaOptions) -> Document {
    formats::mdx::parser::parse_document(source, options)
}

/// Serialize a document tree to canonical MDX markup.
pub fn serialize(doc: &Document) -> String {
    formats::mdx::serializer::serialize_document(doc)
}

/// Index of the first top-level block where `parse(serialize(parse(s)))`
/// differs from `parse(s)`, or `None` when the markup round-trips.
///
/// A length mismatch reports the length of the shorter document.
pub fn round_trip_divergence(source: &str, options: &MediaOptions) -> Option<usize> {
    let first = parse_with_options(source, options);
    let second = parse_with_options(&serialize(&first), options);
    if first == second {
        return None;
    }
    let divergence = first
        .blocks
        .iter()
        .zip(&second.blocks)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| first.blocks.len().min(second.blocks.len()));
    tracing::debug!(block = divergence, "round trip diverged");
    Some(divergence)
}

/// Whether `parse(serialize(parse(source))) == parse(source)`.
pub fn round_trip_stable(source: &str) -> bool {
    round_trip_divergence(source, &MediaOptions::default()).is_none()
}
