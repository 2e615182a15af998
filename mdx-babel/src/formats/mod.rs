//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and text representations.

pub mod icons;
pub mod json;
pub mod mdx;
pub mod treeviz;

pub use json::JsonFormat;
pub use mdx::MdxFormat;
pub use treeviz::TreevizFormat;
