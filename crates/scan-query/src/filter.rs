//! Conjunctive row filtering.

use scan_model::{
    EXPLOSIVE_ARCHETYPE, PinSet, QueryState, QuickFilter, Row, col, normalize_symbol,
};

/// Gap quick filter threshold: the gap percentage must exceed this.
const GAP_THRESHOLD: f64 = 5.0;

/// Whether a row survives every active condition. Conditions combine with
/// AND: each active quick filter adds exactly one conjunct.
pub fn row_matches(row: &Row, state: &QueryState, pins: &PinSet) -> bool {
    let archetype = row.text(col::ML_ARCHETYPE);
    if !state.archetype.is_empty() && archetype != state.archetype {
        return false;
    }

    if !state.preset.is_empty() && !row.text(col::PRESETS_LIST).contains(&state.preset) {
        return false;
    }

    if !state.search.is_empty() {
        let needle = state.search.to_uppercase();
        let symbol = row.symbol().to_uppercase();
        let name = row.text(col::NAME).to_uppercase();
        if !symbol.contains(&needle) && !name.contains(&needle) {
            return false;
        }
    }

    for quick in &state.quick {
        let keep = match quick {
            QuickFilter::Pinned => pins.contains(&normalize_symbol(row.symbol())),
            QuickFilter::Gap => row.number(col::GAP_PCT) > GAP_THRESHOLD,
            QuickFilter::HighOfDay => row.flag(col::FLAG_HOD),
            QuickFilter::Explosive => archetype == EXPLOSIVE_ARCHETYPE,
            QuickFilter::PremarketActive => row.flag(col::FLAG_PM_ACTIVE),
            QuickFilter::Earnings => row.flag(col::FLAG_HAS_EARNINGS),
        };
        if !keep {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_model::{Value, schema};

    fn row(pairs: &[(&str, Value)]) -> Row {
        let mut cells: Vec<Value> = schema()
            .columns()
            .iter()
            .map(|c| Value::default_for(c.kind))
            .collect();
        for (name, value) in pairs {
            cells[schema().ordinal(name).unwrap()] = value.clone();
        }
        Row(cells)
    }

    fn aapl(gap: f64) -> Row {
        row(&[
            ("symbol", Value::Text("AAPL".into())),
            ("name", Value::Text("Apple Inc".into())),
            ("ml_archetype", Value::Text("MOMENTUM".into())),
            ("presets_list", Value::Text("FR|GAP".into())),
            ("gap_pct", Value::Float(gap)),
        ])
    }

    #[test]
    fn empty_state_matches_everything() {
        assert!(row_matches(&aapl(0.0), &QueryState::default(), &PinSet::new()));
    }

    #[test]
    fn search_is_case_insensitive_over_symbol_and_name() {
        let mut state = QueryState::default();
        state.search = "aap".into();
        assert!(row_matches(&aapl(0.0), &state, &PinSet::new()));
        state.search = "apple".into();
        assert!(row_matches(&aapl(0.0), &state, &PinSet::new()));
        state.search = "TSLA".into();
        assert!(!row_matches(&aapl(0.0), &state, &PinSet::new()));
    }

    #[test]
    fn archetype_filter_is_exact() {
        let mut state = QueryState::default();
        state.archetype = "MOMENTUM".into();
        assert!(row_matches(&aapl(0.0), &state, &PinSet::new()));
        state.archetype = "MOMENT".into();
        assert!(!row_matches(&aapl(0.0), &state, &PinSet::new()));
    }

    #[test]
    fn preset_filter_is_a_substring_of_the_pipe_list() {
        let mut state = QueryState::default();
        state.preset = "GAP".into();
        assert!(row_matches(&aapl(0.0), &state, &PinSet::new()));
        state.preset = "VS".into();
        assert!(!row_matches(&aapl(0.0), &state, &PinSet::new()));
    }

    #[test]
    fn gap_filter_requires_strictly_above_five() {
        let mut state = QueryState::default();
        state.toggle_quick(QuickFilter::Gap);
        assert!(row_matches(&aapl(6.2), &state, &PinSet::new()));
        assert!(!row_matches(&aapl(5.0), &state, &PinSet::new()));
        assert!(!row_matches(&aapl(2.0), &state, &PinSet::new()));
    }

    #[test]
    fn scenario_search_and_gap_conjoin() {
        // Two AAPL rows; only the one with gap 6.2 survives search+gap.
        let mut state = QueryState::default();
        state.search = "AAPL".into();
        state.toggle_quick(QuickFilter::Gap);
        assert!(row_matches(&aapl(6.2), &state, &PinSet::new()));
        assert!(!row_matches(&aapl(2.0), &state, &PinSet::new()));
    }

    #[test]
    fn pinned_only_consults_the_pin_set() {
        let mut state = QueryState::default();
        state.toggle_quick(QuickFilter::Pinned);
        let mut pins = PinSet::new();
        assert!(!row_matches(&aapl(0.0), &state, &pins));
        pins.insert("AAPL".into());
        assert!(row_matches(&aapl(0.0), &state, &pins));
    }

    #[test]
    fn explosive_filter_matches_the_sentinel_archetype() {
        let mut state = QueryState::default();
        state.toggle_quick(QuickFilter::Explosive);
        assert!(!row_matches(&aapl(0.0), &state, &PinSet::new()));

        let explosive = row(&[
            ("symbol", Value::Text("GME".into())),
            ("ml_archetype", Value::Text("EXPLOSIVE".into())),
        ]);
        assert!(row_matches(&explosive, &state, &PinSet::new()));
    }

    #[test]
    fn flag_toggles_require_their_flag() {
        let flagged = row(&[
            ("symbol", Value::Text("NVDA".into())),
            ("flag_hod", Value::Bool(true)),
            ("flag_pm_active", Value::Bool(true)),
            ("flag_has_earnings", Value::Bool(true)),
        ]);
        for quick in [
            QuickFilter::HighOfDay,
            QuickFilter::PremarketActive,
            QuickFilter::Earnings,
        ] {
            let mut state = QueryState::default();
            state.toggle_quick(quick);
            assert!(row_matches(&flagged, &state, &PinSet::new()));
            assert!(!row_matches(&aapl(0.0), &state, &PinSet::new()));
        }
    }

    #[test]
    fn adding_conditions_never_enlarges_the_match() {
        // Monotonicity: if a row fails some state, it still fails any
        // stricter state.
        let candidate = aapl(6.2);
        let mut state = QueryState::default();
        assert!(row_matches(&candidate, &state, &PinSet::new()));
        state.search = "AAPL".into();
        assert!(row_matches(&candidate, &state, &PinSet::new()));
        state.toggle_quick(QuickFilter::Gap);
        assert!(row_matches(&candidate, &state, &PinSet::new()));
        state.toggle_quick(QuickFilter::Earnings);
        assert!(!row_matches(&candidate, &state, &PinSet::new()));
        // Dropping back a conjunct cannot be modeled as adding; the stricter
        // state keeps excluding.
        state.archetype = "EXPLOSIVE".into();
        assert!(!row_matches(&candidate, &state, &PinSet::new()));
    }
}
