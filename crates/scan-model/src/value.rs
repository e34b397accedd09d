//! Typed cell values.

use crate::schema::ColumnKind;

/// One coerced cell value. Serialized untagged so payload rows render as
/// plain JSON arrays (`[1, "AAPL", 4.2, true, ...]`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// The coercion default for a column kind (0 / false / empty string).
    pub fn default_for(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Numeric { integer: true } => Self::Int(0),
            ColumnKind::Numeric { integer: false } => Self::Float(0.0),
            ColumnKind::Boolean => Self::Bool(false),
            ColumnKind::Text => Self::Text(String::new()),
        }
    }

    /// Whether this value's runtime kind matches the declared column kind.
    pub fn matches_kind(&self, kind: ColumnKind) -> bool {
        matches!(
            (self, kind),
            (Self::Int(_), ColumnKind::Numeric { integer: true })
                | (Self::Float(_), ColumnKind::Numeric { integer: false })
                | (Self::Bool(_), ColumnKind::Boolean)
                | (Self::Text(_), ColumnKind::Text)
        )
    }

    /// Numeric view: integers and floats directly, booleans as 0/1,
    /// parseable text as its parsed value, everything else 0.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Text view; numeric and boolean values render via `Display`-style
    /// formatting only when explicitly requested elsewhere.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) => s.as_str(),
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_declared_kind() {
        for kind in [
            ColumnKind::Numeric { integer: true },
            ColumnKind::Numeric { integer: false },
            ColumnKind::Boolean,
            ColumnKind::Text,
        ] {
            assert!(Value::default_for(kind).matches_kind(kind));
        }
    }

    #[test]
    fn untagged_serialization_is_flat() {
        let row = vec![
            Value::Int(3),
            Value::Text("AAPL".into()),
            Value::Float(1.5),
            Value::Bool(true),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[3,"AAPL",1.5,true]"#);
    }

    #[test]
    fn numeric_view_of_booleans_and_text() {
        assert_eq!(Value::Bool(true).as_f64(), 1.0);
        assert_eq!(Value::Bool(false).as_f64(), 0.0);
        assert_eq!(Value::Text(" 2.5 ".into()).as_f64(), 2.5);
        assert_eq!(Value::Text("n/a".into()).as_f64(), 0.0);
    }
}
