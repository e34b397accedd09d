//! Source file resolution.
//!
//! Exactly one CSV is active at a time, chosen by: (a) the newest-modified
//! CSV in a configured folder, else (b) a configured explicit path, else
//! (c) the fallback file beside the program.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{IngestError, Result};

/// File name probed in the fallback directory.
pub const FALLBACK_FILE_NAME: &str = "screener_master.csv";

/// Where to look for the active feed file.
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// Watched folder; the newest CSV inside wins.
    pub folder: Option<PathBuf>,
    /// Explicit file path, used when the folder yields nothing.
    pub path: Option<PathBuf>,
    /// Directory holding the fallback file (typically beside the executable).
    pub fallback_dir: Option<PathBuf>,
}

/// Finds the newest-modified CSV file in a directory.
///
/// Returns `Ok(None)` when the directory holds no CSV files.
pub fn find_latest_csv(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        match &newest {
            Some((best, _)) if *best >= modified => {}
            _ => newest = Some((modified, path)),
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// Resolves the active source file, or `SourceNotFound` when nothing does.
pub fn resolve_source(config: &SourceConfig) -> Result<PathBuf> {
    if let Some(folder) = &config.folder
        && folder.is_dir()
        && let Some(path) = find_latest_csv(folder)?
    {
        return Ok(path);
    }

    if let Some(path) = &config.path
        && path.is_file()
    {
        return Ok(path.clone());
    }

    if let Some(dir) = &config.fallback_dir {
        let fallback = dir.join(FALLBACK_FILE_NAME);
        if fallback.is_file() {
            return Ok(fallback);
        }
    }

    Err(IngestError::SourceNotFound {
        folder: config.folder.clone(),
        path: config.path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn newest_csv_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("old.csv"), "symbol\nAAA\n").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        std::fs::write(dir.path().join("new.csv"), "symbol\nBBB\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let latest = find_latest_csv(dir.path()).unwrap().unwrap();
        assert_eq!(latest.file_name().unwrap(), "new.csv");
    }

    #[test]
    fn empty_folder_yields_none() {
        let dir = TempDir::new().unwrap();
        assert!(find_latest_csv(dir.path()).unwrap().is_none());
    }

    #[test]
    fn explicit_path_used_when_folder_is_empty() {
        let dir = TempDir::new().unwrap();
        let feed = dir.path().join("feed.csv");
        std::fs::write(&feed, "symbol\nAAA\n").unwrap();

        let empty = TempDir::new().unwrap();
        let config = SourceConfig {
            folder: Some(empty.path().to_path_buf()),
            path: Some(feed.clone()),
            fallback_dir: None,
        };
        assert_eq!(resolve_source(&config).unwrap(), feed);
    }

    #[test]
    fn fallback_file_is_last_resort() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join(FALLBACK_FILE_NAME);
        std::fs::write(&fallback, "symbol\nAAA\n").unwrap();

        let config = SourceConfig {
            folder: None,
            path: Some(dir.path().join("missing.csv")),
            fallback_dir: Some(dir.path().to_path_buf()),
        };
        assert_eq!(resolve_source(&config).unwrap(), fallback);
    }

    #[test]
    fn nothing_resolves() {
        let config = SourceConfig::default();
        assert!(matches!(
            resolve_source(&config),
            Err(IngestError::SourceNotFound { .. })
        ));
    }
}
