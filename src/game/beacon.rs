//! # Beacon and Darkness
//!
//! The beacon burns down a little every tick. Crystals widen the light around
//! it; once its intensity reaches zero the light is gone for good.

use crate::config::{
    INITIAL_BEACON_INTENSITY, MAX_INTENSITY, RATE_AUGMENTATION_LIGHT_DISPLAY,
    RATE_DIMINUTION_LIGHT, RATE_DIMINUTION_LIGHT_AUGMENTATION, START_BEACON_CASES,
};
use crate::{Point, Position};
use serde::{Deserialize, Serialize};

/// The currently active beacon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    /// Tile-aligned x, tile y plus half a tile
    pub position: Point,
    pub intensity: f64,
    /// Intensity lost per tick
    pub decay_rate: f64,
    /// Set once intensity reached zero
    pub exhausted: bool,
}

impl Beacon {
    /// The spawn beacon, standing on `tile`.
    pub fn new(tile: Position) -> Self {
        Self {
            position: Self::anchor(tile),
            intensity: INITIAL_BEACON_INTENSITY,
            decay_rate: RATE_DIMINUTION_LIGHT,
            exhausted: false,
        }
    }

    fn anchor(tile: Position) -> Point {
        Point::new(tile.x as f64, tile.y as f64 + 0.5)
    }

    /// The tile the beacon stands on.
    pub fn tile(&self) -> Position {
        self.position.tile()
    }

    /// Burns one tick of intensity.
    ///
    /// Returns `true` on the tick the beacon becomes exhausted, never again.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::{Beacon, Position};
    ///
    /// let mut beacon = Beacon::new(Position::new(5, 4));
    /// beacon.intensity = 0.01;
    /// assert!(beacon.decay());
    /// assert_eq!(beacon.intensity, 0.0);
    /// assert!(!beacon.decay());
    /// ```
    pub fn decay(&mut self) -> bool {
        self.intensity = (self.intensity - self.decay_rate).clamp(0.0, MAX_INTENSITY);
        if self.intensity <= 0.0 && !self.exhausted {
            self.exhausted = true;
            return true;
        }
        false
    }

    /// Moves the light to a freshly revived beacon tile.
    ///
    /// Intensity is refilled and the beacon burns faster than before.
    pub fn revive_at(&mut self, tile: Position) {
        self.position = Self::anchor(tile);
        self.intensity = MAX_INTENSITY;
        self.decay_rate += RATE_DIMINUTION_LIGHT_AUGMENTATION;
        self.exhausted = false;
    }
}

/// Radius of the protected zone around the beacon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Darkness {
    pub radius: f64,
}

impl Default for Darkness {
    fn default() -> Self {
        Self {
            radius: START_BEACON_CASES,
        }
    }
}

impl Darkness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the radius of a freshly lit beacon.
    pub fn reset(&mut self) {
        self.radius = START_BEACON_CASES;
    }

    /// Widens the light for each deposited crystal.
    pub fn brighten(&mut self, crystals: usize) {
        self.radius += crystals as f64 * RATE_AUGMENTATION_LIGHT_DISPLAY;
    }

    /// No light at all.
    pub fn collapse(&mut self) {
        self.radius = 0.0;
    }

    /// Whether `point` is outside the light centred on `center`.
    pub fn is_dark(&self, center: Point, point: Point) -> bool {
        point.distance(center) > self.radius
    }
}
