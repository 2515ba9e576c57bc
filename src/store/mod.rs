//! Address storage
//!
//! Stores and retrieves saved addresses from a file-based store.
//! Addresses are stored in XDG data directory (~/.local/share/pin-drop/).

use crate::address::AddressRecord;
use crate::config::defaults::APP_DIR_NAME;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const STORE_FILE_NAME: &str = "addresses.json";

/// A saved address with store metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAddress {
    /// Unique identifier
    pub id: String,

    /// When the address was saved
    pub created_at: DateTime<Utc>,

    /// The address itself
    #[serde(flatten)]
    pub record: AddressRecord,
}

impl StoredAddress {
    /// Wrap a record with a fresh id and timestamp
    pub fn new(record: AddressRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            record,
        }
    }
}

/// Address storage manager
#[derive(Debug)]
pub struct AddressStore {
    entries: Vec<StoredAddress>,
    path: PathBuf,
}

impl AddressStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))
    }

    /// Get the default store file path
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(STORE_FILE_NAME))
    }

    /// Load the store from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::store_path()?)
    }

    /// Load the store from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read address store: {}", e))
            })?;

            serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse address store: {}", e))
            })?
        } else {
            Vec::new()
        };

        Ok(Self { entries, path })
    }

    /// Path this store reads from and saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the store to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create data directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;

        fs::write(&self.path, content).map_err(|e| {
            Error::Config(format!("Failed to write address store: {}", e))
        })?;

        Ok(())
    }

    /// Add a record, returning the stored entry
    ///
    /// Entries keep insertion order, oldest first.
    pub fn add(&mut self, record: AddressRecord) -> StoredAddress {
        let entry = StoredAddress::new(record);
        self.entries.push(entry.clone());
        entry
    }

    /// Get all entries
    pub fn entries(&self) -> &[StoredAddress] {
        &self.entries
    }

    /// Get entry by ID
    pub fn get(&self, id: &str) -> Option<&StoredAddress> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Remove entry by ID
    pub fn remove(&mut self, id: &str) -> Option<StoredAddress> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Remove entry by ID and persist the removal
    ///
    /// If the save fails the entry is put back at its old position, so
    /// memory keeps matching what is on disk.
    pub fn delete(&mut self, id: &str) -> Result<Option<StoredAddress>> {
        let Some(idx) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let entry = self.entries.remove(idx);
        if let Err(e) = self.save() {
            self.entries.insert(idx, entry);
            return Err(e);
        }

        Ok(Some(entry))
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
