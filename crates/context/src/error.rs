//! Error types for loading category sources and rule files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for context operations.
pub type ContextResult<T> = Result<T, ContextError>;

/// Errors reported by the load operations.
///
/// Classification and mode decisions never fail; only loading external
/// sources can, and every failure leaves a well-defined fallback in place.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Failed to read a source file.
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Category source contained no usable `process=category` line.
    #[error("No valid category mappings in '{path}'")]
    NoValidEntries { path: PathBuf },

    /// Rules file is not valid JSON for a rule list.
    #[error("Invalid rules file '{path}': {source}")]
    ParseRules {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A rule parsed but carries out-of-range values.
    #[error("Invalid rule #{index} in '{path}': {message}")]
    InvalidRule {
        path: PathBuf,
        index: usize,
        message: String,
    },
}
