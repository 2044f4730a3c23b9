//! Slot-keyed JSON persistence.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::slot::Slot;

/// Durable key-value store: one JSON file per [`Slot`] under a data
/// directory.
///
/// Reads are tolerant: an absent file, unreadable content or malformed
/// JSON all come back as `None`, and callers seed their defaults. Writes
/// are atomic (temp file + rename) so a crash mid-save never leaves a
/// half-written slot behind.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at the given directory. The directory is
    /// created lazily on first save.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a store at the platform data directory.
    pub fn open_default() -> Self {
        Self::open(Self::default_dir())
    }

    /// Platform data directory for Tatame.
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("br", "Tatame", "Tatame")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".tatame"))
    }

    /// Directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.file_name())
    }

    /// Load the last persisted value for a slot.
    ///
    /// Returns `None` when the slot was never written or its content does
    /// not parse; a damaged slot is reported at `warn` and treated as
    /// absent.
    pub fn load<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let path = self.slot_path(slot);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!("discarding malformed slot {slot}: {error}");
                None
            }
        }
    }

    /// Load a slot, seeding the provided default when absent.
    pub fn load_or<T: DeserializeOwned>(&self, slot: Slot, default: impl FnOnce() -> T) -> T {
        self.load(slot).unwrap_or_else(default)
    }

    /// Overwrite a slot. The value is retrievable by the next `load` once
    /// this returns.
    pub fn save<T: Serialize + ?Sized>(&self, slot: Slot, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|source| StoreError::Serialization { source })?;

        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source,
        })?;

        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|source| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(json.as_bytes())
            .map_err(|source| StoreError::Io {
                operation: "write",
                path: temp_path.clone(),
                source,
            })?;
        file.sync_all().map_err(|source| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &path).map_err(|source| StoreError::Io {
            operation: "rename",
            path: path.clone(),
            source,
        })?;

        tracing::debug!("saved slot {slot}");
        Ok(())
    }

    /// Remove a single slot.
    pub fn remove(&self, slot: Slot) -> Result<()> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                operation: "remove",
                path,
                source,
            }),
        }
    }

    /// Erase every slot.
    pub fn clear(&self) -> Result<()> {
        for slot in Slot::ALL {
            self.remove(slot)?;
        }
        tracing::info!("cleared all slots under {}", self.root.display());
        Ok(())
    }
}
