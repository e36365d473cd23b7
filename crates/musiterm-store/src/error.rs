//! Storage error types.
//!
//! Both enums describe recoverable data problems. Callers at the top of
//! the stack log them and carry on with empty or default values.

use std::path::PathBuf;

use musiterm_core::Category;
use thiserror::Error;

/// Failures reading or writing persisted user state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read, written, or renamed into place.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The codec rejected the bytes.
    #[error("codec error on {path}: {message}")]
    Codec { path: PathBuf, message: String },

    /// The decoded bytes were not the expected JSON.
    #[error("malformed data in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures loading a category's term set.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The resource was missing, undecodable, or not a term object.
    #[error("resource unavailable for {category} ({resource}): {reason}")]
    ResourceUnavailable {
        category: Category,
        resource: &'static str,
        reason: String,
    },
}

impl DictionaryError {
    pub fn category(&self) -> Category {
        match self {
            DictionaryError::ResourceUnavailable { category, .. } => *category,
        }
    }
}
