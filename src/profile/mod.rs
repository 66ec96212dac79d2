//! # Profile Module
//!
//! The player's persistent record: key bindings, which precious stones have
//! been collected and the best score so far.
//!
//! A [`ProfileManager`] owns the record together with the store it was
//! loaded from. Every mutation writes the whole record back immediately.

pub mod store;

pub use store::*;

use crate::{ExplorerResult, InputAction, KeyBindings, PreciousStone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which stone kinds the player has brought back to a beacon.
///
/// Serialized as a map from stone display name to a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionRecord(BTreeMap<PreciousStone, bool>);

impl Default for CollectionRecord {
    fn default() -> Self {
        Self(PreciousStone::ALL.iter().map(|&stone| (stone, false)).collect())
    }
}

impl CollectionRecord {
    /// Whether the stone has been collected.
    pub fn is_collected(&self, stone: PreciousStone) -> bool {
        self.0.get(&stone).copied().unwrap_or(false)
    }

    /// Marks a stone as collected. Returns `true` when it was new.
    pub fn record(&mut self, stone: PreciousStone) -> bool {
        let previous = self.0.insert(stone, true);
        previous != Some(true)
    }

    /// Number of distinct stones collected.
    pub fn collected_count(&self) -> usize {
        self.0.values().filter(|&&collected| collected).count()
    }
}

/// The persistent per-player record.
///
/// # Examples
///
/// ```
/// use world_explorer::PersistentProfile;
///
/// let profile = PersistentProfile::default();
/// assert_eq!(profile.high_score, 0);
/// assert_eq!(profile.keys.interact, "space");
/// assert_eq!(profile.collection.collected_count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentProfile {
    pub keys: KeyBindings,
    pub collection: CollectionRecord,
    pub high_score: u32,
}

/// Owns the profile and writes it back on every change.
#[derive(Debug)]
pub struct ProfileManager {
    profile: PersistentProfile,
    store: Box<dyn ProfileStore>,
}

impl ProfileManager {
    /// Loads the profile from a store.
    pub fn load(store: Box<dyn ProfileStore>) -> ExplorerResult<Self> {
        let profile = store.load()?;
        log::info!(
            "Loaded profile: high score {}, {} stone(s) collected",
            profile.high_score,
            profile.collection.collected_count()
        );
        Ok(Self { profile, store })
    }

    /// A fresh profile kept only in memory.
    pub fn in_memory() -> Self {
        Self {
            profile: PersistentProfile::default(),
            store: Box::new(MemoryStore::default()),
        }
    }

    pub fn profile(&self) -> &PersistentProfile {
        &self.profile
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.profile.keys
    }

    pub fn collection(&self) -> &CollectionRecord {
        &self.profile.collection
    }

    pub fn high_score(&self) -> u32 {
        self.profile.high_score
    }

    /// Writes the whole record to the store.
    pub fn save(&mut self) -> ExplorerResult<()> {
        self.store.save(&self.profile)
    }

    /// Marks stones as collected and saves once. Returns the newly collected ones.
    pub fn record_stones<I>(&mut self, stones: I) -> ExplorerResult<Vec<PreciousStone>>
    where
        I: IntoIterator<Item = PreciousStone>,
    {
        let new: Vec<PreciousStone> = stones
            .into_iter()
            .filter(|&stone| self.profile.collection.record(stone))
            .collect();
        for stone in &new {
            log::info!("Collected {} for the first time", stone);
        }
        self.save()?;
        Ok(new)
    }

    /// Keeps the best score. Returns `true` when `score` is a new record.
    pub fn update_high_score(&mut self, score: u32) -> ExplorerResult<bool> {
        let improved = score > self.profile.high_score;
        if improved {
            log::info!("New high score: {} (was {})", score, self.profile.high_score);
            self.profile.high_score = score;
        }
        self.save()?;
        Ok(improved)
    }

    /// Rebinds an action to another key.
    pub fn set_key(&mut self, action: InputAction, key: impl Into<String>) -> ExplorerResult<()> {
        self.profile.keys.set(action, key);
        self.save()
    }
}
