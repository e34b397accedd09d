//! Field coercion: raw CSV text to typed values.
//!
//! Coercion is total and deterministic. It never fails: unparsable numerics
//! become zero, unrecognized booleans become false, absent values become the
//! column default. This is a deliberate availability-over-strictness policy:
//! a half-broken feed still renders.

use scan_model::{Column, ColumnKind, Value};

/// Values treated as "no number here" before any parse attempt.
const NULLISH: &[&str] = &["nan", "none", "null"];

/// The fixed truthy token set; everything else is false.
const TRUTHY: &[&str] = &["true", "1", "yes", "y", "t"];

/// Coerces one raw field (or its absence) to the column's typed value.
pub fn coerce_field(column: &Column, raw: Option<&str>) -> Value {
    match column.kind {
        ColumnKind::Numeric { integer } => coerce_numeric(integer, raw),
        ColumnKind::Boolean => Value::Bool(coerce_boolish(raw)),
        ColumnKind::Text => Value::Text(coerce_text(raw)),
    }
}

fn coerce_numeric(integer: bool, raw: Option<&str>) -> Value {
    let zero = if integer {
        Value::Int(0)
    } else {
        Value::Float(0.0)
    };

    let Some(raw) = raw else { return zero };
    let trimmed = raw.trim();
    if trimmed.is_empty() || NULLISH.iter().any(|n| trimmed.eq_ignore_ascii_case(n)) {
        return zero;
    }

    let Ok(parsed) = trimmed.parse::<f64>() else {
        return zero;
    };
    // Rust's float parser accepts "inf"/"infinity"; numeric cells must stay
    // finite.
    if !parsed.is_finite() {
        return zero;
    }

    if integer {
        Value::Int(parsed as i64)
    } else {
        Value::Float(round6(parsed))
    }
}

fn coerce_boolish(raw: Option<&str>) -> bool {
    let Some(raw) = raw else { return false };
    let trimmed = raw.trim();
    TRUTHY.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
}

fn coerce_text(raw: Option<&str>) -> String {
    raw.map_or_else(String::new, |s| s.trim().trim_matches('\r').to_owned())
}

/// Rounds to 6 decimal places, matching the feed's declared precision.
fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_model::schema;

    fn column(name: &str) -> &'static Column {
        schema().column(name).unwrap()
    }

    #[test]
    fn empty_and_nullish_numerics_are_zero() {
        for raw in [None, Some(""), Some("  "), Some("NaN"), Some("None"), Some("NULL")] {
            assert_eq!(coerce_field(column("gap_pct"), raw), Value::Float(0.0));
            assert_eq!(coerce_field(column("volume"), raw), Value::Int(0));
        }
    }

    #[test]
    fn unparsable_numerics_default_silently() {
        // Scenario: change_pct="-3.5" parses, volume="1,000" does not.
        assert_eq!(
            coerce_field(column("change_pct"), Some("-3.5")),
            Value::Float(-3.5)
        );
        assert_eq!(coerce_field(column("volume"), Some("1,000")), Value::Int(0));
        assert_eq!(coerce_field(column("vwap"), Some("$4.20")), Value::Float(0.0));
    }

    #[test]
    fn floats_round_to_six_places() {
        assert_eq!(
            coerce_field(column("vwap"), Some("1.23456789")),
            Value::Float(1.234568)
        );
    }

    #[test]
    fn count_columns_truncate_to_whole_numbers() {
        assert_eq!(
            coerce_field(column("volume"), Some("1234.9")),
            Value::Int(1234)
        );
        assert_eq!(
            coerce_field(column("master_rank"), Some("3")),
            Value::Int(3)
        );
    }

    #[test]
    fn infinities_stay_finite() {
        assert_eq!(coerce_field(column("vwap"), Some("inf")), Value::Float(0.0));
        assert_eq!(
            coerce_field(column("vwap"), Some("-infinity")),
            Value::Float(0.0)
        );
    }

    #[test]
    fn only_the_truthy_set_is_true() {
        for raw in ["true", "TRUE", " 1 ", "yes", "Y", "t"] {
            assert_eq!(
                coerce_field(column("flag_hod"), Some(raw)),
                Value::Bool(true)
            );
        }
        for raw in ["", "0", "no", "false", "maybe", "2"] {
            assert_eq!(
                coerce_field(column("flag_hod"), Some(raw)),
                Value::Bool(false)
            );
        }
        assert_eq!(coerce_field(column("flag_hod"), None), Value::Bool(false));
    }

    #[test]
    fn text_trims_whitespace_and_stray_cr() {
        assert_eq!(
            coerce_field(column("name"), Some("  Acme Corp\r")),
            Value::Text("Acme Corp".into())
        );
        assert_eq!(coerce_field(column("name"), None), Value::Text(String::new()));
    }

    #[test]
    fn coercion_is_deterministic() {
        let col = column("composite_score");
        assert_eq!(
            coerce_field(col, Some("72.5")),
            coerce_field(col, Some("72.5"))
        );
    }
}
