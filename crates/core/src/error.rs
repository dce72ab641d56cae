//! Error types for the byte-pair encoding crates.

use crate::core::Symbol;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type shared by the bytepair crates.
#[derive(Error, Debug)]
pub enum BpeError {
    /// A symbol has no entry in the vocabulary
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(Symbol),

    /// A merge rule breaks the merge table invariants
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error loading a saved model
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a model
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BpeError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for bytepair operations.
pub type Result<T> = std::result::Result<T, BpeError>;
