//! Sort keys and comparators.

use std::cmp::Ordering;

use scan_model::{EffectiveField, Row, Value};

/// A comparable sort key: numeric values compare numerically, everything
/// else compares as a case-sensitive lexicographic string. Mixed pairs fall
/// back to string comparison of both sides.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Num(f64),
    Str(String),
}

impl SortKey {
    fn of(value: &Value) -> Self {
        match value {
            Value::Int(v) => Self::Num(*v as f64),
            Value::Float(v) => Self::Num(*v),
            Value::Bool(v) => Self::Num(if *v { 1.0 } else { 0.0 }),
            Value::Text(s) => {
                match s.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => Self::Num(n),
                    _ => Self::Str(s.clone()),
                }
            }
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a.total_cmp(b),
            (a, b) => a.as_text().cmp(&b.as_text()),
        }
    }

    fn as_text(&self) -> String {
        match self {
            Self::Num(n) => n.to_string(),
            Self::Str(s) => s.clone(),
        }
    }
}

/// The sort key for one row under a named sort column. The three effective
/// fields resolve through their fallback pair; every other column keys on
/// its stored value.
pub fn sort_key(row: &Row, column: &str) -> SortKey {
    if let Some(field) = EffectiveField::for_column(column) {
        return SortKey::Num(row.effective(field));
    }
    match row.value(column) {
        Some(value) => SortKey::of(value),
        None => SortKey::Str(String::new()),
    }
}
