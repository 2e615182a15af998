//! Document tree exchanged with the editor.
//!
//! This module defines the structured representation that the MDX parser
//! produces and the serializer consumes. It mirrors the shape of a rich-text
//! editor's internal model closely enough that the editor can hydrate from it
//! directly (see [`crate::formats::json`] for the JSON boundary).

pub mod nodes;
