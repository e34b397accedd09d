//! Export record layout: the 21-field header and per-row cell formatting.

use scan_model::{EffectiveField, Row, col};

/// Column headers of the export, in output order.
pub const EXPORT_HEADER: [&str; 21] = [
    "Rank", "Symbol", "PxEff", "ChgEff%", "Name", "Sector", "Session", "BestPreset", "Presets",
    "Score", "ML", "Archetype", "Conf", "Gap%", "HOD%", "VolEff", "RVol", "Turn", "VWAP",
    "Spread%", "Flags",
];

/// Condition flags in the order they appear in the `Flags` cell, paired with
/// their short labels.
const FLAG_LABELS: &[(&str, &str)] = &[
    (col::FLAG_HOD, "HOD"),
    ("flag_thin_supply", "THIN"),
    ("flag_big_move", "BIG"),
    ("flag_gap_up", "GAP↑"),
    (col::FLAG_PM_ACTIVE, "PM✓"),
    ("flag_illiquid", "ILLQ"),
    (col::FLAG_BROKEN_QUOTE, "QUOTE"),
    (col::FLAG_NO_DOLLAR_VOL, "$VOL"),
    ("flag_low_ah_liquidity", "AH-LIQ"),
    ("flag_session_reversal", "REV"),
    ("flag_session_exhaustion", "EXH"),
    (col::FLAG_HAS_EARNINGS, "EARN"),
];

/// Labels of the set condition flags, joined with `|`. Empty when no flag is
/// set.
pub fn flag_labels(row: &Row) -> String {
    let labels: Vec<&str> = FLAG_LABELS
        .iter()
        .filter(|(column, _)| row.flag(column))
        .map(|&(_, label)| label)
        .collect();
    labels.join("|")
}

fn fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

fn whole(value: f64) -> String {
    format!("{}", value as i64)
}

/// One export record as formatted cells, matching [`EXPORT_HEADER`].
pub fn record(row: &Row) -> Vec<String> {
    vec![
        whole(row.number(col::MASTER_RANK)),
        row.symbol().to_owned(),
        fixed(row.effective(EffectiveField::Price), 2),
        fixed(row.effective(EffectiveField::Change), 2),
        row.text(col::NAME).to_owned(),
        row.text(col::SECTOR).to_owned(),
        row.text(col::SESSION).to_owned(),
        row.text(col::BEST_PRESET).to_owned(),
        row.text(col::PRESETS_LIST).to_owned(),
        fixed(row.number(col::COMPOSITE_SCORE), 1),
        fixed(row.number(col::ML_FINAL_SCORE), 1),
        row.text(col::ML_ARCHETYPE).to_owned(),
        row.text(col::ML_CONFIDENCE).to_owned(),
        fixed(row.number(col::GAP_PCT), 2),
        fixed(row.number(col::HOD_DISTANCE), 1),
        whole(row.effective(EffectiveField::Volume)),
        fixed(row.number(col::REL_VOLUME), 1),
        fixed(row.number(col::TURNOVER_RATE), 2),
        fixed(row.number(col::VWAP), 2),
        fixed(row.number(col::SPREAD_PCT), 2),
        flag_labels(row),
    ]
}
