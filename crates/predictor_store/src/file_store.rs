use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use page_logging::{page_debug, page_warn};
use serde::{Deserialize, Serialize};

use crate::persist::{ensure_store_dir, AtomicFileWriter};
use crate::{LocalStore, StoreError};

pub const STORE_FILENAME: &str = ".local_store.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedStore {
    entries: BTreeMap<String, String>,
}

/// Local store backed by one RON file holding every key.
///
/// The whole map is rewritten atomically on each write, so a crash leaves
/// either the old or the new content on disk.
pub struct FileStore {
    dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens (or creates) the store under `dir`.
    ///
    /// An unreadable or corrupt store file is logged and treated as empty.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        ensure_store_dir(&dir)?;
        let entries = read_entries(&dir);
        Ok(Self { dir, entries })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn flush(&self) -> Result<(), StoreError> {
        let state = PersistedStore {
            entries: self.entries.clone(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&state, pretty)
            .map_err(|err| StoreError::Encode(err.to_string()))?;

        let writer = AtomicFileWriter::new(self.dir.clone());
        let path = writer.write(STORE_FILENAME, &content)?;
        page_debug!("Flushed {} store entries to {:?}", self.entries.len(), path);
        Ok(())
    }
}

fn read_entries(dir: &Path) -> BTreeMap<String, String> {
    let path = dir.join(STORE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return BTreeMap::new();
        }
        Err(err) => {
            page_warn!("Failed to read local store from {:?}: {}", path, err);
            return BTreeMap::new();
        }
    };

    match ron::from_str::<PersistedStore>(&content) {
        Ok(state) => state.entries,
        Err(err) => {
            page_warn!("Failed to parse local store from {:?}: {}", path, err);
            BTreeMap::new()
        }
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
