//! Engine error taxonomy
//!
//! Every variant is recoverable at the caller: a consuming client maps each
//! one to a "not found" or "please check input" message and keeps going.
//! Unstructured input is data, not failure, so a document with no recognized
//! headings parses to an empty section list instead of producing an error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the retrieval engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The source file could not be read
    #[error("source unavailable: {path:?}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file carries no extractable text layer (e.g. a scanned PDF)
    #[error("no extractable text layer: {path:?}")]
    UnsupportedFormat { path: PathBuf },

    /// No document with this id exists in the corpus
    #[error("document not found: {id}")]
    DocumentNotFound { id: String },

    /// The document has no section with this number
    #[error("section {number} not found in document {id}")]
    SectionNotFound { id: String, number: String },

    /// The search query was empty after trimming
    #[error("search query must not be empty")]
    InvalidQuery,
}

/// Engine result alias
pub type Result<T> = std::result::Result<T, EngineError>;
