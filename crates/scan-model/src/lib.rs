//! Core data model for the screener terminal.
//!
//! This crate defines the typed building blocks the rest of the workspace
//! operates on:
//!
//! - **Schema**: the fixed, ordered registry of feed columns and their
//!   semantic types (numeric / boolean / text)
//! - **Table**: an immutable snapshot of coerced rows plus provenance
//! - **QueryState**: the live user query (search, filters, sort, paging)
//! - **PinStore**: the persisted set of pinned symbols, independent of any
//!   particular table snapshot
//! - **Payloads**: serde types mirroring the JSON shapes consumed by
//!   rendering collaborators

mod error;
mod payload;
mod pins;
mod query;
mod schema;
mod table;
mod value;

pub use error::{ModelError, Result};
pub use payload::{DataPayload, SchemaInfo, SourceStatus};
pub use pins::{PinSet, PinStore, normalize_symbol};
pub use query::{
    DEFAULT_DISPLAY, DISPLAY_INCREMENT, DisplayCount, QueryState, QuickFilter, SortDirection,
    SortSpec, ViewResult,
};
pub use schema::{
    Column, ColumnKind, EXPLOSIVE_ARCHETYPE, EffectiveField, Schema, col, schema,
};
pub use table::{Provenance, Row, Table};
pub use value::Value;
