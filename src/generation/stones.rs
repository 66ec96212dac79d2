//! # Stone Selection
//!
//! Chooses which precious stone a generated cell holds. A kind already in the
//! player's collection, or already placed somewhere in the current world, is
//! never offered again.

use crate::{CollectionRecord, PreciousStone};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Stone kinds already placed in the current world.
pub type StoneSet = BTreeSet<PreciousStone>;

/// Stone kinds that are neither excluded nor collected.
///
/// # Examples
///
/// ```
/// use world_explorer::{available_stones, CollectionRecord, PreciousStone, StoneSet};
///
/// let mut excluded = StoneSet::new();
/// excluded.insert(PreciousStone::Ruby);
/// let mut collection = CollectionRecord::default();
/// collection.record(PreciousStone::Jade);
///
/// let stones = available_stones(&excluded, &collection);
/// assert_eq!(stones.len(), 19);
/// assert!(!stones.contains(&PreciousStone::Ruby));
/// assert!(!stones.contains(&PreciousStone::Jade));
/// ```
pub fn available_stones(excluded: &StoneSet, collection: &CollectionRecord) -> Vec<PreciousStone> {
    PreciousStone::ALL
        .iter()
        .copied()
        .filter(|stone| !excluded.contains(stone) && !collection.is_collected(*stone))
        .collect()
}

/// Picks a random available stone and adds it to `excluded`.
///
/// Returns `None` when every kind is excluded or collected.
pub fn take_stone<R: Rng + ?Sized>(
    rng: &mut R,
    excluded: &mut StoneSet,
    collection: &CollectionRecord,
) -> Option<PreciousStone> {
    let stone = *available_stones(excluded, collection).choose(rng)?;
    excluded.insert(stone);
    Some(stone)
}
