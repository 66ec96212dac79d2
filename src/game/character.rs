//! # Character
//!
//! The explorer: a continuous position, a facing, a small inventory and the
//! running score.

use crate::config::MAX_CRYSTALS;
use crate::{
    display_orientation, facing_from_motion, normalize_motion, resolve_motion, ChunkedWorld,
    DisplayOrientation, Facing, Point, Position, PreciousStone,
};
use serde::{Deserialize, Serialize};

/// One inventory slot's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeldItem {
    Crystal,
    Stone(PreciousStone),
}

/// Items carried back to the beacon, at most [`MAX_CRYSTALS`].
///
/// # Examples
///
/// ```
/// use world_explorer::{HeldItem, Inventory};
///
/// let mut inventory = Inventory::new();
/// assert!(inventory.add(HeldItem::Crystal));
/// assert!(inventory.add(HeldItem::Crystal));
/// assert!(!inventory.add(HeldItem::Crystal));
/// assert_eq!(inventory.crystal_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<HeldItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. Returns `false` and leaves the inventory unchanged when full.
    pub fn add(&mut self, item: HeldItem) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_CRYSTALS
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[HeldItem] {
        &self.items
    }

    /// Number of crystals held.
    pub fn crystal_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, HeldItem::Crystal))
            .count()
    }

    /// Empties the inventory, returning what was held.
    pub fn take_all(&mut self) -> Vec<HeldItem> {
        std::mem::take(&mut self.items)
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub position: Point,
    pub facing: Facing,
    pub orientation: DisplayOrientation,
    pub inventory: Inventory,
    pub score: u32,
}

impl Character {
    /// A character standing at `position`, facing down with nothing held.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            facing: Facing::Bottom,
            orientation: DisplayOrientation::Front,
            inventory: Inventory::new(),
            score: 0,
        }
    }

    /// The tile the character stands on.
    pub fn tile(&self) -> Position {
        self.position.tile()
    }

    /// The tile in front of the character.
    pub fn faced_tile(&self) -> Position {
        self.tile() + self.facing.to_delta()
    }

    /// Moves one tick's worth toward `(x_move, y_move)`.
    ///
    /// Facing only changes while there is motion. Returns `true` when the
    /// tile under the character changed.
    pub fn step(&mut self, world: &ChunkedWorld, x_move: f64, y_move: f64, speed: f64) -> bool {
        let (x_move, y_move) = normalize_motion(x_move, y_move);
        let previous = self.tile();

        self.position = resolve_motion(world, self.position, x_move, y_move, speed);
        if let Some(facing) = facing_from_motion(x_move, y_move) {
            self.facing = facing;
        }
        self.orientation = display_orientation(x_move, y_move);

        self.tile() != previous
    }
}
