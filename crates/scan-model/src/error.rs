//! Error types for the model crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read the pin store file.
    #[error("failed to read pin store {path}: {source}")]
    PinRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the pin store file.
    #[error("failed to write pin store {path}: {source}")]
    PinWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pin store file exists but is not valid JSON.
    #[error("invalid pin store format in {path}: {source}")]
    PinFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
