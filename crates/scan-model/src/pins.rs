//! Persisted pinned-symbol store.
//!
//! Pins are keyed by upper-cased symbol and live outside any table snapshot:
//! the set survives refreshes and sessions, and may be mutated at any time,
//! including between two evaluations of the same table. Persistence is a
//! plain JSON array written atomically (temp file, then rename).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{ModelError, Result};

/// The in-memory pin set, as consumed by query evaluation.
pub type PinSet = BTreeSet<String>;

/// Canonical pin key for a symbol.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// A small last-write-wins key-set store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct PinStore {
    path: PathBuf,
    pins: PinSet,
}

impl PinStore {
    /// Loads the store; a missing file yields an empty set.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let pins = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let raw: Vec<String> =
                    serde_json::from_str(&text).map_err(|source| ModelError::PinFormat {
                        path: path.clone(),
                        source,
                    })?;
                raw.iter().map(|s| normalize_symbol(s)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PinSet::new(),
            Err(source) => {
                return Err(ModelError::PinRead {
                    path: path.clone(),
                    source,
                });
            }
        };
        Ok(Self { path, pins })
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.pins.contains(&normalize_symbol(symbol))
    }

    /// Toggles a symbol; returns whether it is now pinned. Blank symbols are
    /// ignored.
    pub fn toggle(&mut self, symbol: &str) -> bool {
        let key = normalize_symbol(symbol);
        if key.is_empty() {
            return false;
        }
        if self.pins.remove(&key) {
            false
        } else {
            self.pins.insert(key);
            true
        }
    }

    pub fn add(&mut self, symbol: &str) -> bool {
        let key = normalize_symbol(symbol);
        !key.is_empty() && self.pins.insert(key)
    }

    pub fn remove(&mut self, symbol: &str) -> bool {
        self.pins.remove(&normalize_symbol(symbol))
    }

    /// Writes the set to disk atomically.
    pub fn save(&self) -> Result<()> {
        let list: Vec<&String> = self.pins.iter().collect();
        let json = serde_json::to_string_pretty(&list).map_err(|source| ModelError::PinFormat {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, json.as_bytes()).map_err(|source| ModelError::PinWrite {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}
