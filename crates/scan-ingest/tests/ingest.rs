//! End-to-end ingestion tests: folder resolution through typed table.

use std::path::PathBuf;

use tempfile::TempDir;

use scan_ingest::{RefreshGuard, SourceConfig, load_table, source_status};
use scan_model::{DataPayload, schema};

const FEED: &str = "\
master_rank,symbol,name,gap_pct,change_pct,volume,flag_hod,presets_list
1,AAPL,Apple,6.2,-3.5,\"1,000\",true,FR|GAP
2,MSFT,Microsoft,2.0,1.25,2000,false,VS
";

fn write_feed(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn folder_to_payload_pipeline() {
    let dir = TempDir::new().unwrap();
    write_feed(&dir, "screener_0930.csv", FEED);

    let config = SourceConfig {
        folder: Some(dir.path().to_path_buf()),
        ..SourceConfig::default()
    };
    let table = load_table(&config);
    assert!(!table.is_err());
    assert_eq!(table.total(), 2);

    // Scenario A: "-3.5" parses; "1,000" does not and defaults to zero.
    let aapl = &table.rows[0];
    assert_eq!(aapl.number("change_pct"), -3.5);
    assert_eq!(aapl.number("volume"), 0.0);

    let payload = DataPayload::from_table(&table);
    assert_eq!(payload.total, 2);
    assert_eq!(payload.columns.len(), schema().len());
    assert!(payload.error.is_none());
    assert_eq!(payload.file.as_deref(), Some("screener_0930.csv"));

    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains("\"col_index\""));
    assert!(json.contains("\"numeric_cols\""));
}

#[test]
fn windows_1252_feed_decodes_via_fallback() {
    let dir = TempDir::new().unwrap();
    let bytes = b"symbol,name\nCAF\xC9,Caf\xE9 Holdings\n";
    let path = dir.path().join("latin.csv");
    std::fs::write(&path, bytes).unwrap();

    let config = SourceConfig {
        path: Some(path),
        ..SourceConfig::default()
    };
    let table = load_table(&config);
    assert!(!table.is_err());
    assert_eq!(table.provenance.encoding.as_deref(), Some("windows-1252"));
    assert_eq!(table.rows[0].symbol(), "CAFÉ");
}

#[test]
fn refresh_guard_tracks_a_real_file() {
    let dir = TempDir::new().unwrap();
    write_feed(&dir, "feed.csv", FEED);

    let config = SourceConfig {
        folder: Some(dir.path().to_path_buf()),
        ..SourceConfig::default()
    };

    let mut guard = RefreshGuard::default();
    let status = source_status(&config);
    assert!(guard.is_stale(&status));
    guard.observe(&status);
    assert!(!guard.is_stale(&source_status(&config)));
}

#[test]
fn failed_ingest_keeps_the_previous_table_usable() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(&dir, "feed.csv", FEED);

    let config = SourceConfig {
        path: Some(path.clone()),
        ..SourceConfig::default()
    };
    let good = load_table(&config);
    assert!(!good.is_err());

    std::fs::remove_file(&path).unwrap();
    let bad = load_table(&config);
    assert!(bad.is_err());
    assert_eq!(bad.total(), 0);

    // The previous snapshot is untouched; the caller chooses what to show.
    assert_eq!(good.total(), 2);
}
