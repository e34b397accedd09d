//! Live query state and evaluation results.

use std::collections::BTreeSet;

use crate::schema::col;
use crate::table::Row;

/// Initial number of rows shown.
pub const DEFAULT_DISPLAY: usize = 25;
/// Rows added by each "load more" request.
pub const DISPLAY_INCREMENT: usize = 25;

/// A boolean toggle that adds exactly one conjunct to the row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilter {
    /// Only rows whose symbol is pinned.
    Pinned,
    /// Only rows with a gap percentage above 5.
    Gap,
    /// Only rows flagged at the high of day.
    HighOfDay,
    /// Only rows with the explosive archetype.
    Explosive,
    /// Only rows flagged premarket-active.
    PremarketActive,
    /// Only rows with an earnings flag.
    Earnings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Initial direction when a column is first selected: descending for
    /// every column except the primary rank, where smallest rank is best.
    pub fn initial_for(column: &str) -> Self {
        if column == col::MASTER_RANK {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// Pagination limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DisplayCount {
    Limit(usize),
    All,
}

impl DisplayCount {
    pub fn cap(self, len: usize) -> usize {
        match self {
            Self::Limit(n) => n.min(len),
            Self::All => len,
        }
    }
}

impl Default for DisplayCount {
    fn default() -> Self {
        Self::Limit(DEFAULT_DISPLAY)
    }
}

/// The complete user query: search text, category/preset filters, active
/// quick-filter toggles, sort selection, and display limit.
///
/// Only the pin set persists across table refreshes and sessions; it lives in
/// [`crate::PinStore`], injected into evaluation separately so `evaluate`
/// stays a pure function.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueryState {
    /// Case-insensitive substring matched against symbol and name.
    pub search: String,
    /// Exact-match archetype filter; empty means all.
    pub archetype: String,
    /// Substring matched against the pipe-delimited preset list; empty means
    /// all.
    pub preset: String,
    pub quick: BTreeSet<QuickFilter>,
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub display: DisplayCount,
}

impl QueryState {
    /// Toggles one quick filter; returns whether it is now active.
    pub fn toggle_quick(&mut self, filter: QuickFilter) -> bool {
        if self.quick.remove(&filter) {
            false
        } else {
            self.quick.insert(filter);
            true
        }
    }

    /// Applies a sort-column click: repeated clicks on the active column flip
    /// direction; a new column starts at its initial direction.
    pub fn toggle_sort(&mut self, column: &str) {
        match &mut self.sort {
            Some(spec) if spec.column == column => {
                spec.direction = spec.direction.flipped();
            }
            _ => {
                self.sort = Some(SortSpec {
                    column: column.to_owned(),
                    direction: SortDirection::initial_for(column),
                });
            }
        }
    }

    /// Grows the display limit by the fixed increment; no-op when unbounded.
    pub fn load_more(&mut self) {
        if let DisplayCount::Limit(n) = self.display {
            self.display = DisplayCount::Limit(n + DISPLAY_INCREMENT);
        }
    }

    pub fn show_all(&mut self) {
        self.display = DisplayCount::All;
    }
}

/// The ordered, filtered, paginated view of one table snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewResult {
    /// The rows actually shown, in display order.
    pub rows: Vec<Row>,
    /// `rows.len()`, reported alongside the other counts.
    pub shown: usize,
    /// Rows surviving the filter, before pagination.
    pub filtered: usize,
    /// Rows in the table, before filtering.
    pub total: usize,
}
