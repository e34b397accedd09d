//! The evaluation pipeline: filter, pin-first order, paginate.

use tracing::debug;

use scan_model::{PinSet, QueryState, Row, SortDirection, Table, ViewResult, normalize_symbol};

use crate::filter::row_matches;
use crate::sort::sort_key;

/// The full filtered order as indices into `table.rows`, before pagination.
///
/// Filtered rows are partitioned into pinned and unpinned, each keeping its
/// prior relative order. Without an explicit sort the concatenation of the
/// two partitions *is* the order; with one, each partition is sorted
/// independently by the same stable comparator and then concatenated, so
/// pinned rows are never interleaved with unpinned rows regardless of sort
/// key.
pub fn ordered_indices(table: &Table, state: &QueryState, pins: &PinSet) -> Vec<usize> {
    let mut pinned = Vec::new();
    let mut unpinned = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        if !row_matches(row, state, pins) {
            continue;
        }
        if pins.contains(&normalize_symbol(row.symbol())) {
            pinned.push(i);
        } else {
            unpinned.push(i);
        }
    }

    if let Some(spec) = &state.sort {
        sort_partition(&mut pinned, table, spec.column.as_str(), spec.direction);
        sort_partition(&mut unpinned, table, spec.column.as_str(), spec.direction);
    }

    debug!(
        pinned = pinned.len(),
        unpinned = unpinned.len(),
        sort = state.sort.as_ref().map(|s| s.column.as_str()),
        "ordered view"
    );

    pinned.extend(unpinned);
    pinned
}

/// Stable within-partition sort. Descending reverses the comparator, which
/// still reports equal keys as equal, so ties keep their prior relative
/// order in both directions.
fn sort_partition(indices: &mut [usize], table: &Table, column: &str, direction: SortDirection) {
    let keys: Vec<_> = table
        .rows
        .iter()
        .map(|row| sort_key(row, column))
        .collect();
    indices.sort_by(|&a, &b| match direction {
        SortDirection::Ascending => keys[a].compare(&keys[b]),
        SortDirection::Descending => keys[b].compare(&keys[a]),
    });
}

/// The filtered, ordered rows before pagination, in the sequence the
/// exporter serializes.
pub fn ordered_rows(table: &Table, state: &QueryState, pins: &PinSet) -> Vec<Row> {
    ordered_indices(table, state, pins)
        .into_iter()
        .map(|i| table.rows[i].clone())
        .collect()
}

/// Evaluates the query: the paginated view plus shown/filtered/total counts.
pub fn evaluate(table: &Table, state: &QueryState, pins: &PinSet) -> ViewResult {
    let order = ordered_indices(table, state, pins);
    let filtered = order.len();
    let shown = state.display.cap(filtered);
    let rows: Vec<Row> = order[..shown].iter().map(|&i| table.rows[i].clone()).collect();
    ViewResult {
        rows,
        shown,
        filtered,
        total: table.total(),
    }
}
