//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations.
///
/// The MDX conversion core itself never fails; these surface from the format
/// layer (unknown format names, malformed JSON at the editor boundary).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    Parse(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
