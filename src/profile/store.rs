//! Profile persistence backends.

use super::PersistentProfile;
use crate::ExplorerResult;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads and saves the persistent profile.
pub trait ProfileStore: Debug {
    /// Reads the stored profile.
    fn load(&self) -> ExplorerResult<PersistentProfile>;

    /// Replaces the stored profile.
    fn save(&mut self, profile: &PersistentProfile) -> ExplorerResult<()>;
}

/// A profile kept as pretty-printed JSON on disk.
///
/// A missing file is created with the default profile on first load.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, profile: &PersistentProfile) -> ExplorerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> ExplorerResult<PersistentProfile> {
        if !self.path.exists() {
            log::info!("No profile at {}, creating one", self.path.display());
            let profile = PersistentProfile::default();
            self.write(&profile)?;
            return Ok(profile);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&mut self, profile: &PersistentProfile) -> ExplorerResult<()> {
        log::debug!("Saving profile to {}", self.path.display());
        self.write(profile)
    }
}

/// A store that never touches the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stored: Option<PersistentProfile>,
}

impl MemoryStore {
    /// A store pre-filled with a profile.
    pub fn with_profile(profile: PersistentProfile) -> Self {
        Self {
            stored: Some(profile),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> ExplorerResult<PersistentProfile> {
        Ok(self.stored.clone().unwrap_or_default())
    }

    fn save(&mut self, profile: &PersistentProfile) -> ExplorerResult<()> {
        self.stored = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExplorerError, PreciousStone, ProfileManager};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.json");
        let store = JsonFileStore::new(&path);

        let profile = store.load().unwrap();
        assert_eq!(profile, PersistentProfile::default());
        assert!(path.exists());
    }

    #[test]
    fn test_manager_changes_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let mut manager = ProfileManager::load(Box::new(JsonFileStore::new(&path))).unwrap();
        manager.record_stones([PreciousStone::Diamond]).unwrap();
        manager.update_high_score(21).unwrap();
        drop(manager);

        let reloaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(reloaded.high_score, 21);
        assert!(reloaded.collection.is_collected(PreciousStone::Diamond));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(ExplorerError::Serde(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let mut profile = PersistentProfile::default();
        profile.high_score = 5;
        let mut store = MemoryStore::with_profile(profile.clone());
        assert_eq!(store.load().unwrap(), profile);

        profile.high_score = 9;
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap().high_score, 9);
    }
}
