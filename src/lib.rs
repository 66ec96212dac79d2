//! # World Explorer
//!
//! A tile-based exploration game: a character digs through procedurally
//! generated caves, gathers crystals and precious stones, and brings them back
//! to a beacon before the darkness swallows everything.
//!
//! ## Architecture Overview
//!
//! The crate is organised around a small headless core and thin adapters:
//!
//! - **Generation**: room generation with connectivity-guaranteed carving
//! - **World**: an unbounded chunked tile space stitched from rooms on demand
//! - **Movement rules**: tile capabilities, collision and orientation
//! - **Session**: the per-game state machine driven by one `tick` entry point
//! - **Collaborators**: rendering, audio, input and persistence interfaces,
//!   with a macroquad window and headless implementations
//!
//! Everything in the core runs synchronously inside a tick; no threads, no
//! async work.

pub mod game;
pub mod generation;
pub mod input;
pub mod profile;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use profile::*;
pub use rendering::*;

/// Core error type for the World Explorer engine.
#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A room with different dimensions was stitched into the world
    #[error("Room dimensions {found:?} do not match the world's {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Carving never connected the beacon to every side of its room
    #[error("Map generation gave up after {rounds} carving rounds")]
    MapGenerationExhausted { rounds: u32 },

    /// Generated content failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A map text file could not be parsed
    #[error("Invalid map format: {0}")]
    InvalidMapFormat(String),

    /// Session state is invalid
    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the World Explorer codebase.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Ticks per second of the fixed-rate update loop
    pub const FPS: u32 = 30;

    /// Side length, in tiles, of a generated room
    pub const MAP_SIZE: usize = 10;

    /// Chance for each cell of a new room to hold a crystal
    pub const CRYSTAL_PROBABILITY: f64 = 0.04;

    /// Chance for each cell of a new room to hold a precious stone
    pub const PRECIOUS_STONE_PROBABILITY: f64 = 0.02;

    /// Initial length of every carving walk
    pub const NUMBER_CASES_DIGGER: u32 = 4;

    /// Direction retries per carving step before the walk is abandoned
    pub const NUMBER_TRIALS: u32 = 6;

    /// Upper bound on carving rounds for a beacon room
    pub const MAX_CARVE_ROUNDS: u32 = 1000;

    /// Distance travelled per tick at full input
    pub const SPEED: f64 = 0.08;

    /// Axis magnitude below which the display orientation ignores an axis
    pub const DISPLAY_DEAD_ZONE: f64 = 0.25;

    /// Inventory capacity
    pub const MAX_CRYSTALS: usize = 2;

    /// Points granted for reviving an inactive beacon
    pub const REVIVAL_BONUS: u32 = 5;

    /// Initial beacon decay per tick
    pub const RATE_DIMINUTION_LIGHT: f64 = 0.02;

    /// Decay increase applied on every beacon revival
    pub const RATE_DIMINUTION_LIGHT_AUGMENTATION: f64 = 0.0025;

    /// Light radius gained per deposited crystal
    pub const RATE_AUGMENTATION_LIGHT_DISPLAY: f64 = 1.0;

    /// Light radius of a freshly lit beacon
    pub const START_BEACON_CASES: f64 = 3.0;

    /// Intensity of a revived beacon
    pub const MAX_INTENSITY: f64 = 100.0;

    /// Intensity of the spawn beacon
    pub const INITIAL_BEACON_INTENSITY: f64 = 10.0;

    /// Seconds the character survives outside the light
    pub const MAX_TIME_IN_DARK: u32 = 10;

    /// Seconds the game-over screen freezes before the session ends
    pub const GAME_OVER_FREEZE_TIME: u32 = 2;

    /// Radius scanned for crystals by the proximity sound
    pub const SOUND_RADIUS_CRYSTAL: i32 = 3;

    /// Radius scanned for unlit beacons by the proximity sound
    pub const SOUND_RADIUS_BEACON: i32 = 3;

    /// Chance per tick of an ambient water drop
    pub const PROBABILITY_WATER_DROPS: f64 = 0.005;

    /// Tiles across the width of the viewport
    pub const CASES_ON_WIDTH: i32 = 8;

    /// Idle frames at the start of the tutorial
    pub const WAIT_FRAMES: u32 = 15;

    /// Frames of each lateral move in the tutorial
    pub const FRAMES_LATERAL: u32 = 5;
}
