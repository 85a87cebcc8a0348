//! Cross-Platform Path Utilities
//!
//! Resolves the directory used for persisted engine state.

use std::path::{Path, PathBuf};

use crate::utils::error::{StoreError, StoreResult};

/// Get the taskboard state directory (platform-local data dir + `taskboard/`)
pub fn state_dir() -> StoreResult<PathBuf> {
    dirs::data_local_dir()
        .map(|d| d.join("taskboard"))
        .ok_or_else(|| StoreError::storage("Could not determine local data directory"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> StoreResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the state directory, creating it if it doesn't exist
pub fn ensure_state_dir() -> StoreResult<PathBuf> {
    let path = state_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_dir() {
        let dir = state_dir();
        assert!(dir.is_ok());
        assert!(dir.unwrap().to_string_lossy().contains("taskboard"));
    }

    #[test]
    fn test_ensure_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.exists());
    }
}
