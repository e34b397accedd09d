//! Pure query evaluation over a table snapshot.
//!
//! [`evaluate`] is a pure function of (table, query state, pin set): no
//! ambient state, no I/O. It filters conjunctively, orders pinned rows ahead
//! of unpinned rows under every sort configuration, sorts stably, and
//! paginates.

mod engine;
mod filter;
mod sort;
mod stats;

pub use engine::{evaluate, ordered_indices, ordered_rows};
pub use filter::row_matches;
pub use sort::{SortKey, sort_key};
pub use stats::{SummaryStats, distinct_archetypes};
