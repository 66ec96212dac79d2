//! # Game Module
//!
//! Core game state management, world representation and movement rules.
//!
//! This module contains the fundamental building blocks of World Explorer:
//! - Tile types and their capability table
//! - The chunked world stitched from generated rooms
//! - Character, inventory and beacon state
//! - Movement resolution and orientation
//! - The exploration session state machine

pub mod beacon;
pub mod character;
pub mod clock;
pub mod movement;
pub mod state;
pub mod tile;
pub mod tutorial;
pub mod world;

pub use beacon::*;
pub use character::*;
pub use clock::*;
pub use movement::*;
pub use state::*;
pub use tile::*;
pub use tutorial::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents an integer tile coordinate.
///
/// In the world, `y` grows upward. Inside a [`crate::Room`], `y` is the row
/// index counted from the top.
///
/// # Examples
///
/// ```
/// use world_explorer::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Chebyshev distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, -4);
    /// assert_eq!(pos1.chebyshev_distance(pos2), 4);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.x, self.y - 1),
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y + 1),
        ]
    }

    /// Returns every position within `radius` tiles, this one included.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = Position> {
        (-radius..=radius).flat_map(move |dx| {
            (-radius..=radius).map(move |dy| Position::new(self.x + dx, self.y + dy))
        })
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A continuous position in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the tile containing this point.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::{Point, Position};
    ///
    /// assert_eq!(Point::new(5.5, -0.25).tile(), Position::new(5, -1));
    /// ```
    pub fn tile(self) -> Position {
        Position::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point displaced by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// The four directions a character can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Top,
    Bottom,
    Left,
    Right,
}

impl Facing {
    /// Converts a facing to a position delta. `Top` points toward `+y`.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::{Facing, Position};
    ///
    /// assert_eq!(Facing::Top.to_delta(), Position::new(0, 1));
    /// assert_eq!(Facing::Left.to_delta(), Position::new(-1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Facing::Top => Position::new(0, 1),
            Facing::Bottom => Position::new(0, -1),
            Facing::Right => Position::new(1, 0),
            Facing::Left => Position::new(-1, 0),
        }
    }

    /// Returns all four facings.
    pub fn all() -> [Facing; 4] {
        [Facing::Top, Facing::Bottom, Facing::Left, Facing::Right]
    }
}

/// Sprite orientation derived from the motion vector. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayOrientation {
    Front,
    Back,
    Left,
    Right,
    LeftFront,
    RightFront,
    LeftBack,
    RightBack,
}
