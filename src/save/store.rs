//! Key-value blob storage.
//!
//! Each persisted entity is an independently keyed JSON blob. `FileStore`
//! keeps one file per key; `MemoryStore` keeps a map and is what tests use.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode '{key}': {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("could not decode '{key}': {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
}

/// Every persisted blob, by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKey {
    FarmPlots,
    HarvestCount,
    Donations,
    Inventory,
    Ledger,
    Calendar,
    DayCycle,
    FarmProfile,
}

impl BlobKey {
    pub const ALL: [BlobKey; 8] = [
        BlobKey::FarmPlots,
        BlobKey::HarvestCount,
        BlobKey::Donations,
        BlobKey::Inventory,
        BlobKey::Ledger,
        BlobKey::Calendar,
        BlobKey::DayCycle,
        BlobKey::FarmProfile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlobKey::FarmPlots => "farm_plots",
            BlobKey::HarvestCount => "harvest_count",
            BlobKey::Donations => "donations",
            BlobKey::Inventory => "inventory",
            BlobKey::Ledger => "ledger",
            BlobKey::Calendar => "calendar",
            BlobKey::DayCycle => "day_cycle",
            BlobKey::FarmProfile => "farm_profile",
        }
    }
}

pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError>;
    fn clear(&mut self, key: &str) -> Result<(), SaveError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SaveError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per blob under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError> {
        atomic_write(&self.path(key), bytes)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SaveError> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Write to `<path>.tmp`, flush, then rename over `path`. A crash mid-write
/// leaves the previous file intact.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = path.with_extension("json.tmp");
    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn encode_blob<T: Serialize + ?Sized>(key: BlobKey, value: &T) -> Result<Vec<u8>, SaveError> {
    serde_json::to_vec(value).map_err(|source| SaveError::Encode {
        key: key.as_str(),
        source,
    })
}

pub fn decode_blob<T: DeserializeOwned>(key: BlobKey, bytes: &[u8]) -> Result<T, SaveError> {
    serde_json::from_slice(bytes).map_err(|source| SaveError::Decode {
        key: key.as_str(),
        source,
    })
}

/// The store the simulation persists into. Write failures are logged and
/// swallowed; read failures fall back to "absent".
#[derive(Resource)]
pub struct SaveStore {
    backend: Box<dyn KeyValueStore + Send + Sync>,
}

impl SaveStore {
    pub fn new(backend: impl KeyValueStore + Send + Sync + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn memory() -> Self {
        Self::new(MemoryStore::default())
    }

    pub fn files(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(dir))
    }

    pub fn store<T: Serialize + ?Sized>(&mut self, key: BlobKey, value: &T) {
        let result = encode_blob(key, value).and_then(|bytes| self.backend.save(key.as_str(), &bytes));
        if let Err(e) = result {
            warn!("[Save] Could not write '{}': {}", key.as_str(), e);
        }
    }

    /// `None` when the blob is absent, unreadable, or fails to decode.
    pub fn load<T: DeserializeOwned>(&self, key: BlobKey) -> Option<T> {
        let bytes = match self.backend.load(key.as_str()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("[Save] Could not read '{}': {}", key.as_str(), e);
                return None;
            }
        };
        match decode_blob(key, &bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("[Save] {}. Using default.", e);
                None
            }
        }
    }

    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: BlobKey) -> T {
        self.load(key).unwrap_or_default()
    }

    pub fn contains(&self, key: BlobKey) -> bool {
        matches!(self.backend.load(key.as_str()), Ok(Some(_)))
    }

    pub fn clear(&mut self, key: BlobKey) {
        if let Err(e) = self.backend.clear(key.as_str()) {
            warn!("[Save] Could not clear '{}': {}", key.as_str(), e);
        }
    }

    pub fn clear_all(&mut self) {
        for key in BlobKey::ALL {
            self.clear(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sproutfield_store_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_blob_keys_are_unique() {
        let mut names: Vec<&str> = BlobKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BlobKey::ALL.len());
    }

    #[test]
    fn test_memory_store_absent_then_present_then_cleared() {
        let mut store = SaveStore::memory();
        assert_eq!(store.load::<u32>(BlobKey::HarvestCount), None);
        store.store(BlobKey::HarvestCount, &7u32);
        assert!(store.contains(BlobKey::HarvestCount));
        assert_eq!(store.load::<u32>(BlobKey::HarvestCount), Some(7));
        store.clear(BlobKey::HarvestCount);
        assert!(!store.contains(BlobKey::HarvestCount));
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_default() {
        let mut backend = MemoryStore::default();
        backend.save("harvest_count", b"{not json").unwrap();
        let store = SaveStore::new(backend);
        assert_eq!(store.load::<u32>(BlobKey::HarvestCount), None);
        assert_eq!(store.load_or_default::<u32>(BlobKey::HarvestCount), 0);
    }

    #[test]
    fn test_clear_all_removes_every_blob() {
        let mut store = SaveStore::memory();
        for key in BlobKey::ALL {
            store.store(key, &1u8);
        }
        store.clear_all();
        assert!(BlobKey::ALL.iter().all(|k| !store.contains(*k)));
    }

    #[test]
    fn test_file_store_writes_atomically() {
        let dir = test_dir("atomic");
        let mut store = FileStore::new(&dir);
        store.save("ledger", b"v1").unwrap();
        store.save("ledger", b"v2").unwrap();
        assert_eq!(store.load("ledger").unwrap(), Some(b"v2".to_vec()));
        assert!(!dir.join("ledger.json.tmp").exists());
        store.clear("ledger").unwrap();
        assert_eq!(store.load("ledger").unwrap(), None);
        store.clear("ledger").unwrap();
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_missing_dir_reads_as_absent() {
        let store = FileStore::new(test_dir("missing"));
        assert_eq!(store.load("calendar").unwrap(), None);
    }
}
