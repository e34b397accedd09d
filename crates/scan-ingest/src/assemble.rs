//! Table assembly: the full ingestion pipeline and its error boundary.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use scan_model::{Provenance, Row, Table, schema};

use crate::coerce::coerce_field;
use crate::decode::decode_bytes;
use crate::discovery::{SourceConfig, resolve_source};
use crate::error::{IngestError, Result};
use crate::reader::parse_csv;
use crate::status::format_modified;

/// Identity of one ingested byte stream.
#[derive(Debug, Clone, Default)]
pub struct SourceMeta {
    pub file: Option<String>,
    pub path: Option<PathBuf>,
    /// Modification time, pre-formatted `%Y-%m-%d %H:%M:%S`.
    pub modified: Option<String>,
    pub size_bytes: Option<u64>,
}

impl SourceMeta {
    fn for_path(path: &Path) -> Self {
        let metadata = std::fs::metadata(path).ok();
        Self {
            file: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            path: Some(path.to_path_buf()),
            modified: metadata
                .as_ref()
                .and_then(|m| m.modified().ok())
                .map(format_modified),
            size_bytes: metadata.map(|m| m.len()),
        }
    }

    fn into_provenance(self, encoding: Option<&'static str>) -> Provenance {
        Provenance {
            file: self.file,
            path: self.path,
            modified: self.modified,
            size_bytes: self.size_bytes,
            encoding: encoding.map(str::to_owned),
        }
    }
}

/// Ingests one decoded-and-parsed byte stream into a typed table.
///
/// Every parsed record becomes one fixed-length row spanning the full
/// declared column registry; columns the source file lacks coerce to their
/// defaults. Input order is preserved as-is; it carries no ranking meaning.
pub fn ingest_bytes(bytes: &[u8], meta: SourceMeta) -> Result<Table> {
    let display_path = meta
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from("<bytes>"));

    let Some((text, encoding)) = decode_bytes(bytes) else {
        return Err(IngestError::DecodeFailure { path: display_path });
    };
    debug!(encoding, bytes = bytes.len(), "decoded feed content");

    let parsed = parse_csv(&text, &display_path)?;

    let registry = schema();
    let unknown: Vec<&String> = parsed
        .headers
        .iter()
        .filter(|h| !h.is_empty() && registry.column(h).is_none())
        .collect();
    if !unknown.is_empty() {
        debug!(count = unknown.len(), "source carries undeclared columns");
    }

    let mut rows = Vec::with_capacity(parsed.records.len());
    for record in &parsed.records {
        let cells = registry
            .columns()
            .iter()
            .map(|column| coerce_field(column, parsed.field(record, column.name)))
            .collect();
        rows.push(Row(cells));
    }

    let table = Table::new(rows, meta.into_provenance(Some(encoding)));
    info!(
        rows = table.total(),
        file = table.provenance.file.as_deref().unwrap_or("<bytes>"),
        encoding,
        "ingested screener feed"
    );
    Ok(table)
}

/// Reads and ingests one file.
pub fn ingest_file(path: &Path) -> Result<Table> {
    let meta = SourceMeta::for_path(path);
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::SourceNotFound {
                folder: None,
                path: Some(path.to_path_buf()),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    ingest_bytes(&bytes, meta)
}

/// The ingestion boundary: resolves the source and ingests it, converting
/// every failure into a zero-row table with a populated error message.
///
/// Callers holding a previous good table may keep displaying it alongside the
/// returned error.
pub fn load_table(config: &SourceConfig) -> Table {
    let path = match resolve_source(config) {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "source resolution failed");
            return Table::failed(e.to_string(), Provenance::default());
        }
    };

    match ingest_file(&path) {
        Ok(table) => table,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ingestion failed");
            let meta = SourceMeta::for_path(&path);
            Table::failed(e.to_string(), meta.into_provenance(None))
        }
    }
}
