//! Source and pin-store wiring shared by the CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use scan_ingest::{SourceConfig, load_table};
use scan_model::{PinStore, Table};

/// Default pin store file, relative to the working directory.
pub const DEFAULT_PINS_FILE: &str = "scanterm_pins.json";

/// Everything a read command needs: the current table snapshot plus the
/// persisted pin store.
pub struct Session {
    pub table: Table,
    pub pins: PinStore,
}

/// Builds the source configuration from CLI paths, with the executable's
/// directory as the fallback location.
pub fn source_config(csv: Option<&Path>, folder: Option<&Path>) -> SourceConfig {
    SourceConfig {
        folder: folder.map(Path::to_path_buf),
        path: csv.map(Path::to_path_buf),
        fallback_dir: std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
    }
}

/// The pin store path: the explicit flag, else the default in the working
/// directory.
pub fn pins_path(pins_file: Option<&Path>) -> PathBuf {
    pins_file.map_or_else(|| PathBuf::from(DEFAULT_PINS_FILE), Path::to_path_buf)
}

/// Opens the pin store.
pub fn open_pins(pins_file: Option<&Path>) -> Result<PinStore> {
    let path = pins_path(pins_file);
    PinStore::load(&path).with_context(|| format!("load pin store {}", path.display()))
}

/// Loads the table and pin store. Ingestion failures do not fail the open:
/// they surface as a zero-row table carrying an error message.
pub fn open(config: &SourceConfig, pins_file: Option<&Path>) -> Result<Session> {
    let table = load_table(config);
    let pins = open_pins(pins_file)?;
    Ok(Session { table, pins })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_loads_feed_and_empty_pins() {
        let dir = TempDir::new().unwrap();
        let feed = dir.path().join("feed.csv");
        std::fs::write(&feed, "symbol,name\nAAPL,Apple\n").unwrap();
        let pins_file = dir.path().join("pins.json");

        let config = source_config(Some(&feed), None);
        let session = open(&config, Some(&pins_file)).unwrap();
        assert_eq!(session.table.total(), 1);
        assert!(session.table.error.is_none());
        assert!(session.pins.pins().is_empty());
    }

    #[test]
    fn open_survives_a_missing_feed() {
        let dir = TempDir::new().unwrap();
        let config = SourceConfig {
            path: Some(dir.path().join("absent.csv")),
            ..SourceConfig::default()
        };
        let session = open(&config, Some(&dir.path().join("pins.json"))).unwrap();
        assert!(session.table.is_err());
        assert_eq!(session.table.total(), 0);
    }

    #[test]
    fn pins_path_defaults_to_working_directory() {
        assert_eq!(pins_path(None), PathBuf::from(DEFAULT_PINS_FILE));
        let explicit = PathBuf::from("/tmp/p.json");
        assert_eq!(pins_path(Some(&explicit)), explicit);
    }
}
