//! Immutable table snapshots.

use std::path::PathBuf;

use crate::schema::{EffectiveField, col, schema};
use crate::value::Value;

/// One ticker snapshot: a fixed-length sequence of typed values, one slot per
/// declared column, in registry order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn get(&self, ordinal: usize) -> Option<&Value> {
        self.0.get(ordinal)
    }

    /// Value of a declared column; `None` only for undeclared names.
    pub fn value(&self, column: &str) -> Option<&Value> {
        schema().ordinal(column).and_then(|i| self.0.get(i))
    }

    /// Numeric view of a column; undeclared names read as zero.
    pub fn number(&self, column: &str) -> f64 {
        self.value(column).map_or(0.0, Value::as_f64)
    }

    /// Text view of a column; undeclared or non-text names read as empty.
    pub fn text(&self, column: &str) -> &str {
        self.value(column).map_or("", Value::as_str)
    }

    /// Boolean view of a column.
    pub fn flag(&self, column: &str) -> bool {
        self.value(column).is_some_and(Value::as_bool)
    }

    pub fn symbol(&self) -> &str {
        self.text(col::SYMBOL)
    }

    /// Resolves an effective field: the preferred computed column unless its
    /// coerced value is zero, in which case the legacy column is used.
    pub fn effective(&self, field: EffectiveField) -> f64 {
        let preferred = self.number(field.preferred());
        if preferred != 0.0 {
            preferred
        } else {
            self.number(field.fallback())
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where a table snapshot came from.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Provenance {
    /// Source file name (no directory).
    pub file: Option<String>,
    /// Full source path.
    pub path: Option<PathBuf>,
    /// Modification time, formatted `%Y-%m-%d %H:%M:%S`.
    pub modified: Option<String>,
    /// Source size in bytes.
    pub size_bytes: Option<u64>,
    /// Name of the encoding that decoded the content.
    pub encoding: Option<String>,
}

/// An immutable snapshot of the screener feed.
///
/// A refresh builds a brand-new `Table` and swaps the reference; nothing
/// mutates a table after assembly. A failed ingestion yields a zero-row table
/// with `error` populated, and the caller decides whether to keep showing the
/// previous snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
    pub provenance: Provenance,
    pub error: Option<String>,
}

impl Table {
    pub fn new(rows: Vec<Row>, provenance: Provenance) -> Self {
        Self {
            rows,
            provenance,
            error: None,
        }
    }

    /// The boundary representation of a failed ingestion.
    pub fn failed(message: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            rows: Vec::new(),
            provenance,
            error: Some(message.into()),
        }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}
