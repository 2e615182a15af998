//! MDX format tests
//!
//! Import (MDX → tree), export (tree → MDX) and the round-trip property.

mod export;
mod import;
mod roundtrip;
