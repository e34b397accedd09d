//! Error taxonomy for feed ingestion.
//!
//! All variants are caught at the ingestion boundary ([`crate::load_table`])
//! and converted into a table-shaped result; none propagate far enough to
//! crash a serving collaborator. Field-level coercion failures are not errors
//! at all: they resolve to the column's default.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// No source file resolves from folder, explicit path, or fallback.
    #[error("CSV not found (folder: {folder:?}, path: {path:?})")]
    SourceNotFound {
        folder: Option<PathBuf>,
        path: Option<PathBuf>,
    },

    /// No configured encoding decodes the content.
    #[error("no configured encoding decodes {path}")]
    DecodeFailure { path: PathBuf },

    /// Missing or malformed header/record structure.
    #[error("malformed CSV in {path}: {message}")]
    ParseFailure { path: PathBuf, message: String },

    /// Failed to read a source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read directory entries while resolving the source.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other unexpected failure during ingestion.
    #[error("unexpected ingestion failure: {message}")]
    RuntimeFault { message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
