use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias for document and view operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by documents and views.
///
/// Every failure is reported at the call that detected it; no operation
/// returns a partially built value.
#[derive(Error, Debug)]
pub enum Error {
    /// The native engine could not produce a document from the input.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document root is neither an object nor an array.
    #[error("document root must be an object or array, found {found}")]
    InvalidRoot {
        /// Native type of the root.
        found: &'static str,
    },

    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path passed to `open`.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A string or raw node yielded no UTF-8 data.
    #[error("failed to extract string value")]
    StringExtraction,

    /// A keyed lookup found no matching entry.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// An ordinal lookup fell outside `1..=len`.
    #[error("index {index} out of range (length={len})")]
    IndexOutOfRange {
        /// The 1-based index requested.
        index: usize,
        /// Length of the array.
        len: usize,
    },

    /// An iteration cursor could not be initialized on the node.
    #[error("failed to initialize object iterator")]
    IteratorInit,

    /// The owning document has been closed.
    #[error("document is closed")]
    Closed,
}
