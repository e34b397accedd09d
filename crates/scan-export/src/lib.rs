//! CSV export of the screener view.
//!
//! The export serializes the complete filtered, ordered sequence of rows
//! (pinned first, then unpinned, both under the active sort) with a fixed
//! 21-column layout. Every field is quoted.

mod error;
mod format;
mod writer;

pub use error::{ExportError, Result};
pub use format::{EXPORT_HEADER, flag_labels, record};
pub use writer::{default_export_name, export_string, export_to_path, write_csv};
