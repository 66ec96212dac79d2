//! # Rendering Module
//!
//! The output side of the session: what it asks a renderer to draw and an
//! audio player to play.
//!
//! The session only sends changes. Tiles entering the visible window are
//! placed, tiles leaving it are removed, and tiles that change while visible
//! are placed again.

pub mod audio;
pub mod display;

pub use audio::*;
pub use display::*;

use crate::config::CASES_ON_WIDTH;
use crate::{Character, Point, Position, TileType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Receives tile and light updates from the session.
pub trait Renderer {
    /// Shows a tile, replacing whatever was shown there.
    fn place_tile(&mut self, pos: Position, tile: TileType);

    /// Stops showing a tile.
    fn remove_tile(&mut self, pos: Position);

    /// Draws the darkness around the light centred on `center`.
    fn draw_darkness(&mut self, center: Point, radius: f64);

    /// Draws the character. Renderers without a sprite can ignore it.
    fn draw_character(&mut self, _character: &Character) {}

    /// Drops every handle held for the session.
    fn release(&mut self) {}
}

/// Sounds the session can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    GetCrystal,
    GiveCrystal,
    StartBeacon,
    NearCrystal,
    NearBeacon,
    Darkness,
    Death,
    WaterDrop,
}

/// Plays sounds requested by the session.
pub trait AudioPlayer {
    fn play(&mut self, sound: SoundId, looping: bool);

    fn fade_out(&mut self, sound: SoundId, seconds: f64);
}

/// Half extents, in tiles, of the window around the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub half_width: i32,
    pub half_height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::for_window(800.0, 600.0)
    }
}

impl Viewport {
    /// The window for a screen of the given pixel size.
    ///
    /// [`CASES_ON_WIDTH`] tiles fit across; the height follows the aspect
    /// ratio. Two tiles of margin are added on every side.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::Viewport;
    ///
    /// let viewport = Viewport::for_window(800.0, 600.0);
    /// assert_eq!(viewport.half_width, 6);
    /// assert_eq!(viewport.half_height, 5);
    /// ```
    pub fn for_window(width: f32, height: f32) -> Self {
        let cases_on_height = if width > 0.0 {
            (CASES_ON_WIDTH as f32 * height / width).ceil() as i32
        } else {
            CASES_ON_WIDTH
        };
        Self {
            half_width: CASES_ON_WIDTH / 2 + 2,
            half_height: cases_on_height / 2 + 2,
        }
    }

    /// Whether `pos` lies in the window centred on `center`.
    pub fn contains(&self, center: Position, pos: Position) -> bool {
        (pos.x - center.x).abs() <= self.half_width && (pos.y - center.y).abs() <= self.half_height
    }

    /// Every position of the window centred on `center`.
    pub fn positions(&self, center: Position) -> impl Iterator<Item = Position> {
        let Viewport {
            half_width,
            half_height,
        } = *self;
        (-half_width..=half_width).flat_map(move |dx| {
            (-half_height..=half_height).map(move |dy| Position::new(center.x + dx, center.y + dy))
        })
    }
}

/// A renderer that only remembers what it was told.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Tiles currently shown
    pub shown: HashMap<Position, TileType>,
    /// Every placement, in order
    pub placed: Vec<Position>,
    /// Every removal, in order
    pub removed: Vec<Position>,
    /// The last darkness request
    pub darkness: Option<(Point, f64)>,
    /// The last character drawn
    pub character: Option<Point>,
    pub released: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the placement and removal history, keeping what is shown.
    pub fn clear_history(&mut self) {
        self.placed.clear();
        self.removed.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn place_tile(&mut self, pos: Position, tile: TileType) {
        self.shown.insert(pos, tile);
        self.placed.push(pos);
    }

    fn remove_tile(&mut self, pos: Position) {
        self.shown.remove(&pos);
        self.removed.push(pos);
    }

    fn draw_darkness(&mut self, center: Point, radius: f64) {
        self.darkness = Some((center, radius));
    }

    fn draw_character(&mut self, character: &Character) {
        self.character = Some(character.position);
    }

    fn release(&mut self) {
        self.shown.clear();
        self.released = true;
    }
}

/// An audio player that only remembers what it was asked.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    /// Every play request with its looping flag
    pub played: Vec<(SoundId, bool)>,
    pub faded: Vec<SoundId>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `sound` was played.
    pub fn count(&self, sound: SoundId) -> usize {
        self.played.iter().filter(|(s, _)| *s == sound).count()
    }
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, sound: SoundId, looping: bool) {
        self.played.push((sound, looping));
    }

    fn fade_out(&mut self, sound: SoundId, _seconds: f64) {
        self.faded.push(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_positions() {
        let viewport = Viewport {
            half_width: 2,
            half_height: 1,
        };
        let center = Position::new(10, -3);
        let positions: Vec<_> = viewport.positions(center).collect();
        assert_eq!(positions.len(), 15);
        assert!(positions.iter().all(|&p| viewport.contains(center, p)));
        assert!(!viewport.contains(center, Position::new(13, -3)));
    }

    #[test]
    fn test_recording_renderer() {
        let mut renderer = RecordingRenderer::new();
        renderer.place_tile(Position::origin(), TileType::Rock);
        renderer.remove_tile(Position::origin());
        assert!(renderer.shown.is_empty());
        assert_eq!(renderer.placed.len(), 1);
        assert_eq!(renderer.removed.len(), 1);

        renderer.release();
        assert!(renderer.released);
    }

    #[test]
    fn test_recording_audio_counts() {
        let mut audio = RecordingAudio::new();
        audio.play(SoundId::GetCrystal, false);
        audio.play(SoundId::GetCrystal, false);
        audio.fade_out(SoundId::Darkness, 1.0);
        assert_eq!(audio.count(SoundId::GetCrystal), 2);
        assert_eq!(audio.faded, vec![SoundId::Darkness]);
    }
}
