//! CSV text parsing into header-keyed records.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Parsed CSV content: cleaned header names, a name-to-position index for the
/// source file's own column order, and the data records.
#[derive(Debug)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub index: BTreeMap<String, usize>,
    pub records: Vec<csv::StringRecord>,
}

impl ParsedCsv {
    /// Raw field for a named source column within one record, if the source
    /// file carries that column at all.
    pub fn field<'r>(&self, record: &'r csv::StringRecord, column: &str) -> Option<&'r str> {
        self.index.get(column).and_then(|&i| record.get(i))
    }
}

/// Parses decoded CSV text. Quoted fields may contain delimiters and
/// newlines; records with a deviating field count are tolerated (missing
/// fields read as absent).
pub fn parse_csv(text: &str, path: &Path) -> Result<ParsedCsv> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::ParseFailure {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(clean_header)
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::ParseFailure {
            path: path.to_path_buf(),
            message: "no header row found".to_owned(),
        });
    }

    let index = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();

    let mut records = Vec::new();
    for record_result in reader.records() {
        let record = record_result.map_err(|e| IngestError::ParseFailure {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(ParsedCsv {
        headers,
        index,
        records,
    })
}

/// Header cells arrive with stray whitespace, carriage returns, and
/// occasionally an embedded BOM.
fn clean_header(raw: &str) -> String {
    raw.trim().trim_matches('\r').trim_matches('\u{feff}').to_owned()
}
