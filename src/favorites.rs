//! Per-viewer favorite listings in a simple key-value store.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.path(key);
        std::fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Storage key for a viewer's favorites; anonymous viewers share `guest`
pub fn favorites_key(viewer_id: Option<&str>) -> String {
    let id = viewer_id.map(str::trim).filter(|id| !id.is_empty()).unwrap_or("guest");
    format!("favorites_{id}")
}

/// Favorite listing ids for one viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites {
    key: String,
    ids: Vec<String>,
}

impl Favorites {
    /// Load a viewer's favorites. Missing, unreadable or corrupt data
    /// yields an empty list.
    pub fn load(store: &impl KeyValueStore, viewer_id: Option<&str>) -> Self {
        let key = favorites_key(viewer_id);
        let ids = match store.get(&key) {
            Ok(Some(json)) => serde_json::from_str::<Vec<String>>(&json).unwrap_or_else(|e| {
                warn!("Corrupt favorites under {}: {}", key, e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favorites under {}: {:#}", key, e);
                Vec::new()
            }
        };
        debug!("Loaded {} favorites under {}", ids.len(), key);
        Self { key, ids }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.ids).context("Failed to serialize favorites")?;
        store.set(&self.key, &json)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, listing_id: &str) -> bool {
        self.ids.iter().any(|id| id == listing_id)
    }

    /// Add or remove a listing; returns whether it is now a favorite.
    pub fn toggle(&mut self, listing_id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| id == listing_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(listing_id.to_string());
            true
        }
    }
}
