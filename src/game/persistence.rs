use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::error;

/// Key-value store the level progression persists through. An absent key is
/// never fatal; readers supply a default.
pub trait KeyValueStore {
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn set_int(&mut self, key: &str, value: i32);
    fn flush(&mut self) -> std::io::Result<()>;
}

/// File-backed store: one JSON document of integer values. Reads that fail
/// (missing file, bad JSON) fall back to an empty document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, i32>,
}

impl JsonFileStore {
    pub fn open(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Flush helper shared by callers that treat persistence failures as
/// non-fatal.
pub fn flush_logged(store: &mut dyn KeyValueStore) {
    if let Err(e) = store.flush() {
        error!(target: "persistence", "Failed to flush store: {}", e);
    }
}
