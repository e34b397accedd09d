//! Summary statistics over the shown rows, and filter option enumeration.

use std::collections::BTreeSet;

use scan_model::{
    EXPLOSIVE_ARCHETYPE, EffectiveField, PinSet, Row, Table, col, normalize_symbol,
};

/// Aggregates for the stats bar, computed over the rows actually shown.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SummaryStats {
    pub avg_change: f64,
    pub total_volume: f64,
    pub avg_score: f64,
    /// Rows with a gap percentage above 5.
    pub gap_count: usize,
    /// Rows with the explosive archetype.
    pub explosive_count: usize,
    /// Rows flagged at the high of day.
    pub hod_count: usize,
    /// Rows whose symbol is pinned.
    pub pinned_count: usize,
    /// Rows with a quote-quality risk flag (broken quote or no dollar
    /// volume).
    pub risk_count: usize,
}

impl SummaryStats {
    pub fn compute(rows: &[Row], pins: &PinSet) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let n = rows.len() as f64;
        let mut stats = Self::default();
        for row in rows {
            stats.avg_change += row.effective(EffectiveField::Change);
            stats.total_volume += row.effective(EffectiveField::Volume);
            stats.avg_score += row.number(col::COMPOSITE_SCORE);
            if row.number(col::GAP_PCT) > 5.0 {
                stats.gap_count += 1;
            }
            if row.text(col::ML_ARCHETYPE) == EXPLOSIVE_ARCHETYPE {
                stats.explosive_count += 1;
            }
            if row.flag(col::FLAG_HOD) {
                stats.hod_count += 1;
            }
            if pins.contains(&normalize_symbol(row.symbol())) {
                stats.pinned_count += 1;
            }
            if row.flag(col::FLAG_BROKEN_QUOTE) || row.flag(col::FLAG_NO_DOLLAR_VOL) {
                stats.risk_count += 1;
            }
        }
        stats.avg_change /= n;
        stats.avg_score /= n;
        stats
    }
}

/// Sorted distinct non-empty archetype values, for the category filter's
/// option list.
pub fn distinct_archetypes(table: &Table) -> Vec<String> {
    let mut set = BTreeSet::new();
    for row in &table.rows {
        let archetype = row.text(col::ML_ARCHETYPE);
        if !archetype.is_empty() {
            set.insert(archetype.to_owned());
        }
    }
    set.into_iter().collect()
}
