//! Screener feed ingestion.
//!
//! This crate turns "a CSV file on disk" into a [`scan_model::Table`]:
//!
//! - **Source resolution**: newest CSV in a watched folder, else an explicit
//!   path, else a fallback beside the program
//! - **Decoding**: fixed encoding fallback list with BOM stripping
//! - **Parsing**: header-keyed records honoring standard CSV quoting
//! - **Coercion**: total, never-failing conversion of raw fields to typed
//!   values under the declared column registry
//! - **Boundary**: every failure becomes a zero-row table carrying an error
//!   message, so a transient failure never crashes a serving collaborator or
//!   discards previously good data
//!
//! Ingestion is pure with respect to file content: re-ingesting byte-identical
//! content yields an identical table.

mod assemble;
mod coerce;
mod decode;
mod discovery;
mod error;
mod reader;
mod status;

// === Error Types ===
pub use error::{IngestError, Result};

// === Source Resolution ===
pub use discovery::{FALLBACK_FILE_NAME, SourceConfig, find_latest_csv, resolve_source};

// === Change Detection ===
pub use status::{RefreshGuard, format_modified, source_status};

// === Decoding & Coercion ===
pub use coerce::coerce_field;
pub use decode::decode_bytes;

// === Table Assembly ===
pub use assemble::{SourceMeta, ingest_bytes, ingest_file, load_table};
