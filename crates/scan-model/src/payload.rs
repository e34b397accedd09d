//! Serde payloads consumed by rendering and polling collaborators.

use std::collections::BTreeMap;

use crate::schema::schema;
use crate::table::{Row, Table};

/// Numeric/boolean column partition reported alongside the data.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchemaInfo {
    pub numeric_cols: Vec<String>,
    pub boolish_cols: Vec<String>,
}

/// The full ingestion result payload. A non-null `error` means `rows` must be
/// treated as empty or stale by the consumer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataPayload {
    pub columns: Vec<String>,
    pub col_index: BTreeMap<String, usize>,
    pub rows: Vec<Row>,
    pub schema: SchemaInfo,
    pub total: usize,
    pub file: Option<String>,
    pub modified: Option<String>,
    pub size_kb: Option<f64>,
    pub encoding: Option<String>,
    pub error: Option<String>,
}

impl DataPayload {
    pub fn from_table(table: &Table) -> Self {
        let registry = schema();
        let columns: Vec<String> = registry
            .columns()
            .iter()
            .map(|c| c.name.to_owned())
            .collect();
        let col_index = registry
            .columns()
            .iter()
            .map(|c| (c.name.to_owned(), c.ordinal))
            .collect();
        Self {
            columns,
            col_index,
            rows: table.rows.clone(),
            schema: SchemaInfo {
                numeric_cols: registry.numeric_names(),
                boolish_cols: registry.boolish_names(),
            },
            total: table.total(),
            file: table.provenance.file.clone(),
            modified: table.provenance.modified.clone(),
            size_kb: table
                .provenance
                .size_bytes
                .map(|b| (b as f64 / 1024.0 * 10.0).round() / 10.0),
            encoding: table.provenance.encoding.clone(),
            error: table.error.clone(),
        }
    }
}

/// The lightweight status payload used for poll-based change detection: the
/// consumer refreshes only when `modified` differs from its last seen value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceStatus {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
