//! Error types for dialograph operations.
//!
//! Graph derivation and layout never fail; they absorb malformed plot data
//! locally. [`DialographError`] covers the surrounding I/O, parsing,
//! configuration and export steps.

use std::io;

use thiserror::Error;

/// The main error type for dialograph operations.
///
/// The `Parse` variant keeps the source text alongside the JSON error so
/// callers can show where in the document parsing failed.
#[derive(Debug, Error)]
pub enum DialographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Plot parse error: {err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[source] serde_json::Error),
}

impl DialographError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
