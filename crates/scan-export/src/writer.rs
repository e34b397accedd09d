//! CSV serialization of the filtered, ordered view.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use scan_model::{PinSet, QueryState, Table};
use scan_query::ordered_rows;
use tracing::info;

use crate::error::{ExportError, Result};
use crate::format::{EXPORT_HEADER, record};

/// Writes the export to `out` and returns the number of data rows written.
///
/// The export covers the entire filtered order (pagination does not apply)
/// and quotes every field, so cells containing commas, quotes or newlines
/// survive a round trip through any CSV reader. An empty view still produces
/// the header line.
pub fn write_csv<W: Write>(out: W, table: &Table, state: &QueryState, pins: &PinSet) -> Result<usize> {
    let rows = ordered_rows(table, state, pins);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);
    writer.write_record(EXPORT_HEADER)?;
    for row in &rows {
        writer.write_record(record(row))?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Renders the export as an in-memory string.
pub fn export_string(table: &Table, state: &QueryState, pins: &PinSet) -> Result<(String, usize)> {
    let mut buffer = Vec::new();
    let count = write_csv(&mut buffer, table, state, pins)?;
    // Cells are formatted from UTF-8 strings, so the buffer is UTF-8.
    let text = String::from_utf8_lossy(&buffer).into_owned();
    Ok((text, count))
}

/// Writes the export to a file, creating or truncating it.
pub fn export_to_path(path: &Path, table: &Table, state: &QueryState, pins: &PinSet) -> Result<usize> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let count = write_csv(file, table, state, pins)?;
    info!(path = %path.display(), rows = count, "wrote CSV export");
    Ok(count)
}

/// Date-stamped default file name for an export, e.g.
/// `scanterm_export_2026-08-30.csv`.
pub fn default_export_name() -> String {
    format!("scanterm_export_{}.csv", Local::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_model::{Provenance, Row, Value, schema};

    fn row_with(pairs: &[(&str, Value)]) -> Row {
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

    fn ticker(symbol: &str, name: &str, rank: i64) -> Row {
        row_with(&[
            ("symbol", Value::Text(symbol.into())),
            ("name", Value::Text(name.into())),
            ("master_rank", Value::Int(rank)),
            ("px_eff", Value::Float(5.0)),
        ])
    }

    #[test]
    fn export_is_fully_quoted_with_header() {
        let table = Table::new(
            vec![
                ticker("AAA", "Alpha Corp", 1),
                ticker("BBB", "Beta, Inc.", 2),
                ticker("CCC", "Gamma \"GG\" Ltd", 3),
            ],
            Provenance::default(),
        );
        let (text, count) =
            export_string(&table, &QueryState::default(), &PinSet::new()).unwrap();
        assert_eq!(count, 3);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("\"Rank\",\"Symbol\","));
        assert!(lines[1].contains("\"AAA\""));
        // Embedded commas stay inside the quoted cell, embedded quotes double.
        assert!(lines[2].contains("\"Beta, Inc.\""));
        assert!(lines[3].contains("\"Gamma \"\"GG\"\" Ltd\""));
        for line in &lines[1..] {
            assert_eq!(line.matches('"').count() % 2, 0);
        }
    }

    #[test]
    fn export_covers_the_whole_filtered_order_not_the_page() {
        let rows: Vec<Row> = (0..60).map(|i| ticker(&format!("S{i:02}"), "", i)).collect();
        let table = Table::new(rows, Provenance::default());
        // Default pagination shows 25 rows, but the export ignores it.
        let (text, count) =
            export_string(&table, &QueryState::default(), &PinSet::new()).unwrap();
        assert_eq!(count, 60);
        assert_eq!(text.lines().count(), 61);
    }

    #[test]
    fn export_honors_filters_and_pin_order() {
        let table = Table::new(
            vec![
                ticker("AAA", "Alpha", 1),
                ticker("BBB", "Beta", 2),
                ticker("CCC", "Gamma", 3),
            ],
            Provenance::default(),
        );
        let pins: PinSet = ["CCC".to_owned()].into();
        let (text, count) = export_string(&table, &QueryState::default(), &pins).unwrap();
        assert_eq!(count, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("\"CCC\""));

        let mut state = QueryState::default();
        state.search = "beta".to_owned();
        let (_, count) = export_string(&table, &state, &pins).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn empty_view_still_writes_the_header() {
        let table = Table::new(Vec::new(), Provenance::default());
        let (text, count) =
            export_string(&table, &QueryState::default(), &PinSet::new()).unwrap();
        assert_eq!(count, 0);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn export_to_path_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.csv");
        let table = Table::new(vec![ticker("AAA", "Alpha", 1)], Provenance::default());
        let count =
            export_to_path(&path, &table, &QueryState::default(), &PinSet::new()).unwrap();
        assert_eq!(count, 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("\"Rank\""));
    }

    #[test]
    fn default_name_is_date_stamped() {
        let name = default_export_name();
        assert!(name.starts_with("scanterm_export_"));
        assert!(name.ends_with(".csv"));
    }
}
