//! Poll-based change detection.

use std::time::SystemTime;

use chrono::{DateTime, Local};

use scan_model::SourceStatus;

use crate::discovery::{SourceConfig, resolve_source};

/// Formats a filesystem timestamp the way every payload reports it.
pub fn format_modified(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Builds the status payload for the currently resolvable source. Resolution
/// or stat failures yield `ok: false` with a message instead of an error.
pub fn source_status(config: &SourceConfig) -> SourceStatus {
    let failed = |message: String| SourceStatus {
        ok: false,
        file: None,
        modified: None,
        size_kb: None,
        error: Some(message),
    };

    let path = match resolve_source(config) {
        Ok(path) => path,
        Err(e) => return failed(e.to_string()),
    };
    let metadata = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) => return failed(format!("failed to stat {}: {e}", path.display())),
    };

    SourceStatus {
        ok: true,
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        modified: metadata.modified().ok().map(format_modified),
        size_kb: Some((metadata.len() as f64 / 1024.0 * 10.0).round() / 10.0),
        error: None,
    }
}

/// Tracks the last observed modification timestamp so a caller's poll loop
/// can skip refreshes when the source is unchanged.
#[derive(Debug, Clone, Default)]
pub struct RefreshGuard {
    last_modified: Option<String>,
}

impl RefreshGuard {
    /// Whether this status calls for a re-ingest: the source is readable and
    /// its timestamp differs from the last observed one.
    pub fn is_stale(&self, status: &SourceStatus) -> bool {
        status.ok && status.modified != self.last_modified
    }

    /// Records the observed timestamp after a refresh.
    pub fn observe(&mut self, status: &SourceStatus) {
        if status.ok {
            self.last_modified = status.modified.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn status_reports_resolved_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, "symbol\nAAPL\n").unwrap();

        let config = SourceConfig {
            path: Some(path),
            ..SourceConfig::default()
        };
        let status = source_status(&config);
        assert!(status.ok);
        assert_eq!(status.file.as_deref(), Some("feed.csv"));
        assert!(status.modified.is_some());
        assert!(status.size_kb.is_some());
    }

    #[test]
    fn unresolvable_source_is_not_ok() {
        let config = SourceConfig {
            path: Some(PathBuf::from("/no/such/feed.csv")),
            ..SourceConfig::default()
        };
        let status = source_status(&config);
        assert!(!status.ok);
        assert!(status.error.is_some());
    }

    #[test]
    fn guard_skips_unchanged_timestamps() {
        let status = SourceStatus {
            ok: true,
            file: Some("feed.csv".into()),
            modified: Some("2026-08-30 09:30:00".into()),
            size_kb: Some(1.0),
            error: None,
        };

        let mut guard = RefreshGuard::default();
        assert!(guard.is_stale(&status));
        guard.observe(&status);
        assert!(!guard.is_stale(&status));

        let changed = SourceStatus {
            modified: Some("2026-08-30 09:31:00".into()),
            ..status
        };
        assert!(guard.is_stale(&changed));
    }

    #[test]
    fn guard_never_refreshes_on_a_broken_source() {
        let broken = SourceStatus {
            ok: false,
            file: None,
            modified: None,
            size_kb: None,
            error: Some("CSV not found".into()),
        };
        let guard = RefreshGuard::default();
        assert!(!guard.is_stale(&broken));
    }
}
