//! Error types for CSV export.

use std::io;
use std::path::PathBuf;

/// Errors raised while serializing or writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write CSV export: {0}")]
    Io(#[from] io::Error),

    #[error("failed to create export file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
