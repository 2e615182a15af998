//! Mapping code shared by the formats
//!
//! - `attributes`: parsing of self-closing component tags and their attribute values.
//! - `media`: normalization of component attributes into image and video nodes.

pub mod attributes;
pub mod media;
