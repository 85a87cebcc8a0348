//! Versioned State Persistence
//!
//! Optional durable snapshot of serializable store state, kept under a
//! name + version key. A version mismatch on load discards the snapshot and
//! the store reinitializes from defaults; there is no migration path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::utils::error::StoreResult;
use crate::utils::paths::{ensure_dir, ensure_state_dir};

/// Envelope written to disk around the actual state payload.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    version: u32,
    state: S,
}

/// Named, versioned JSON snapshot on local disk.
#[derive(Debug, Clone)]
pub struct StatePersistence {
    name: String,
    version: u32,
    path: PathBuf,
}

impl StatePersistence {
    /// Snapshot under the default platform state directory
    pub fn new(name: impl Into<String>, version: u32) -> StoreResult<Self> {
        let dir = ensure_state_dir()?;
        Ok(Self::in_dir(&dir, name, version))
    }

    /// Snapshot under an explicit directory (tests, embedders with their own
    /// layout)
    pub fn in_dir(dir: &Path, name: impl Into<String>, version: u32) -> Self {
        let name = name.into();
        let path = dir.join(format!("{name}.json"));
        Self {
            name,
            version,
            path,
        }
    }

    /// Load the snapshot. Returns `None` (discarding any on-disk record) if
    /// the file is missing, unreadable, undecodable, or carries a different
    /// version.
    pub fn load<S: DeserializeOwned>(&self) -> Option<S> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(name = %self.name, "failed to read persisted state: {err}");
                return None;
            }
        };
        let envelope: Envelope<S> = match serde_json::from_str(&content) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(name = %self.name, "discarding undecodable persisted state: {err}");
                self.discard();
                return None;
            }
        };
        if envelope.version != self.version {
            tracing::warn!(
                name = %self.name,
                found = envelope.version,
                expected = self.version,
                "discarding persisted state with mismatched version"
            );
            self.discard();
            return None;
        }
        Some(envelope.state)
    }

    /// Write the snapshot, replacing any previous record.
    pub fn save<S: Serialize>(&self, state: &S) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let envelope = Envelope {
            version: self.version,
            state,
        };
        let content = serde_json::to_string_pretty(&envelope)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn discard(&self) {
        let _ = fs::remove_file(&self.path);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
