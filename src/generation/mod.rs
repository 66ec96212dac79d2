//! # Generation Module
//!
//! Procedural room generation for the chunked world.
//!
//! This module provides the [`Room`] grid, the [`GenerationConfig`] that
//! drives the carving algorithm, the [`Generator`] trait every generator
//! implements, the connectivity checker, the stone selection helpers and the
//! map text format.

pub mod connectivity;
pub mod mapfile;
pub mod room;
pub mod stones;

pub use connectivity::*;
pub use mapfile::*;
pub use room::*;
pub use stones::*;

use crate::config::{
    CRYSTAL_PROBABILITY, MAP_SIZE, MAX_CARVE_ROUNDS, NUMBER_CASES_DIGGER, NUMBER_TRIALS,
    PRECIOUS_STONE_PROBABILITY,
};
use crate::{ExplorerResult, Position, TileType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the size of generated rooms, how densely resources are
/// scattered and how hard the carver works to connect a beacon room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Side length of a generated room
    pub map_size: usize,
    /// Per-cell chance of a crystal (0.0 to 1.0)
    pub crystal_probability: f64,
    /// Per-cell chance of a precious stone (0.0 to 1.0)
    pub precious_stone_probability: f64,
    /// Initial length of each carving walk
    pub number_cases_digger: u32,
    /// Direction retries per carving step
    pub number_trials: u32,
    /// Carving rounds tried before a beacon room is given up on
    pub max_carve_rounds: u32,
}

impl GenerationConfig {
    /// Creates the default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.map_size, 10);
    /// assert!(config.crystal_probability > 0.0);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_size: MAP_SIZE,
            crystal_probability: CRYSTAL_PROBABILITY,
            precious_stone_probability: PRECIOUS_STONE_PROBABILITY,
            number_cases_digger: NUMBER_CASES_DIGGER,
            number_trials: NUMBER_TRIALS,
            max_carve_rounds: MAX_CARVE_ROUNDS,
        }
    }

    /// Creates a configuration for testing with resource-free rooms.
    ///
    /// No crystals or stones are scattered, so the only resource in a beacon
    /// room is the crystal next to the beacon.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            crystal_probability: 0.0,
            precious_stone_probability: 0.0,
            ..Self::new(seed)
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular grid of tiles, stored top row first.
///
/// Room coordinates are `(x = column, y = row from the top)`.
///
/// # Examples
///
/// ```
/// use world_explorer::{Position, Room, TileType};
///
/// let mut room = Room::filled(3, 2, TileType::Rock);
/// assert!(room.set(Position::new(2, 1), TileType::Ground));
/// assert_eq!(room.get(Position::new(2, 1)), Some(TileType::Ground));
/// assert_eq!(room.get(Position::new(3, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    width: usize,
    height: usize,
    cells: Vec<TileType>,
}

impl Room {
    /// Creates a room with every cell set to `tile`.
    pub fn filled(width: usize, height: usize, tile: TileType) -> Self {
        Self {
            width,
            height,
            cells: vec![tile; width * height],
        }
    }

    /// Builds a room from rows, top row first. Rows must share one length.
    pub(crate) fn from_rows(rows: Vec<Vec<TileType>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at a column and row. Panics when out of bounds.
    pub fn tile_at(&self, column: usize, row: usize) -> TileType {
        self.cells[row * self.width + column]
    }

    /// Whether a room coordinate lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Tile at a room coordinate, `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<TileType> {
        self.contains(pos)
            .then(|| self.tile_at(pos.x as usize, pos.y as usize))
    }

    /// Overwrites a cell. Returns `false` when `pos` is out of bounds.
    pub fn set(&mut self, pos: Position, tile: TileType) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let index = pos.y as usize * self.width + pos.x as usize;
        self.cells[index] = tile;
        true
    }

    /// The centre cell, where a beacon is placed.
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Midpoints of the top, bottom, left and right sides.
    pub fn side_midpoints(&self) -> [Position; 4] {
        let (w, h) = (self.width as i32, self.height as i32);
        [
            Position::new(w / 2, 0),
            Position::new(w / 2, h - 1),
            Position::new(0, h / 2),
            Position::new(w - 1, h / 2),
        ]
    }

    /// Every cell with its room coordinate, row by row from the top.
    pub fn cells(&self) -> impl Iterator<Item = (Position, TileType)> + '_ {
        self.cells.iter().enumerate().map(move |(index, tile)| {
            let pos = Position::new((index % self.width) as i32, (index / self.width) as i32);
            (pos, *tile)
        })
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait, allowing for consistent
/// interfaces and reproducible seeding.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ExplorerResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> ExplorerResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.map_size, MAP_SIZE);
        assert_eq!(config.number_trials, 6);
        assert_eq!(config.max_carve_rounds, 1000);
    }

    #[test]
    fn test_generation_config_partial_json() {
        let config: GenerationConfig = serde_json::from_str(r#"{"map_size": 6}"#).unwrap();
        assert_eq!(config.map_size, 6);
        assert_eq!(config.number_cases_digger, NUMBER_CASES_DIGGER);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::filled(10, 10, TileType::Rock);
        assert_eq!(room.center(), Position::new(5, 5));
        assert_eq!(
            room.side_midpoints(),
            [
                Position::new(5, 0),
                Position::new(5, 9),
                Position::new(0, 5),
                Position::new(9, 5),
            ]
        );
        assert_eq!(room.count(TileType::Rock), 100);
    }

    #[test]
    fn test_room_bounds() {
        let mut room = Room::filled(4, 3, TileType::Rock);
        assert!(!room.set(Position::new(-1, 0), TileType::Ground));
        assert!(!room.set(Position::new(0, 3), TileType::Ground));
        assert!(room.set(Position::new(3, 2), TileType::Ground));
        assert_eq!(room.tile_at(3, 2), TileType::Ground);
        assert_eq!(room.cells().count(), 12);
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
