//! # Display Management
//!
//! Screen rendering with macroquad. The display keeps the tiles the session
//! placed and redraws them every frame around the character.

use super::Renderer;
use crate::config::CASES_ON_WIDTH;
use crate::{Character, DisplayOrientation, Point, Position, PreciousStone, TileType};
use macroquad::prelude::*;
use std::collections::HashMap;

/// What the display remembers about the character between frames.
#[derive(Debug, Clone, Copy)]
struct CharacterSprite {
    position: Point,
    orientation: DisplayOrientation,
    held: usize,
    score: u32,
}

/// Macroquad display manager for the game.
#[derive(Debug, Default)]
pub struct MacroquadDisplay {
    tiles: HashMap<Position, TileType>,
    darkness: Option<(Point, f64)>,
    character: Option<CharacterSprite>,
}

impl MacroquadDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles currently retained.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Pixel size of one tile for the current window.
    fn tile_size(&self) -> f32 {
        screen_width() / CASES_ON_WIDTH as f32
    }

    /// Converts a world point to screen pixels, keeping `camera` centred.
    ///
    /// World `y` grows upward, screen `y` downward.
    fn to_screen(&self, camera: Point, x: f64, y: f64) -> (f32, f32) {
        let size = self.tile_size();
        let sx = screen_width() / 2.0 + (x - camera.x) as f32 * size;
        let sy = screen_height() / 2.0 - (y - camera.y) as f32 * size;
        (sx, sy)
    }

    /// Draws the retained scene centred on the character.
    ///
    /// `banner` is printed across the middle of the screen when present.
    pub fn present(&self, banner: Option<&str>) {
        clear_background(BLACK);

        let camera = self
            .character
            .map(|sprite| sprite.position)
            .unwrap_or(Point::new(0.0, 0.0));
        let size = self.tile_size();

        for (pos, tile) in &self.tiles {
            // Top-left corner of a tile is (x, y + 1) in world units
            let (sx, sy) = self.to_screen(camera, pos.x as f64, pos.y as f64 + 1.0);
            draw_rectangle(sx, sy, size, size, tile_color(*tile));
            if let TileType::Stone(stone) = tile {
                draw_circle(sx + size / 2.0, sy + size / 2.0, size / 4.0, stone_color(*stone));
            }
        }

        if let Some(sprite) = self.character {
            let (sx, sy) = self.to_screen(camera, sprite.position.x, sprite.position.y);
            draw_circle(sx, sy, size / 3.0, YELLOW);
            let (dx, dy) = orientation_offset(sprite.orientation);
            draw_line(sx, sy, sx + dx * size / 3.0, sy - dy * size / 3.0, 2.0, BROWN);
        }

        self.draw_shadow(camera, size);

        if let Some(sprite) = self.character {
            let hud = format!("Score {}   Held {}/2", sprite.score, sprite.held);
            draw_text(&hud, 10.0, 24.0, 24.0, WHITE);
        }
        if let Some(text) = banner {
            let dims = measure_text(text, None, 48, 1.0);
            draw_text(
                text,
                (screen_width() - dims.width) / 2.0,
                screen_height() / 2.0,
                48.0,
                RED,
            );
        }
    }

    /// Shades every retained tile outside the light.
    fn draw_shadow(&self, camera: Point, size: f32) {
        let Some((center, radius)) = self.darkness else {
            return;
        };
        let shade = Color::new(0.0, 0.0, 0.0, 0.85);
        for pos in self.tiles.keys() {
            let middle = Point::new(pos.x as f64 + 0.5, pos.y as f64 + 0.5);
            if middle.distance(center) > radius {
                let (sx, sy) = self.to_screen(camera, pos.x as f64, pos.y as f64 + 1.0);
                draw_rectangle(sx, sy, size, size, shade);
            }
        }
        if radius > 0.0 {
            let (cx, cy) = self.to_screen(camera, center.x, center.y);
            draw_circle_lines(cx, cy, radius as f32 * size, 2.0, Color::new(1.0, 0.9, 0.5, 0.4));
        }
    }
}

impl Renderer for MacroquadDisplay {
    fn place_tile(&mut self, pos: Position, tile: TileType) {
        self.tiles.insert(pos, tile);
    }

    fn remove_tile(&mut self, pos: Position) {
        self.tiles.remove(&pos);
    }

    fn draw_darkness(&mut self, center: Point, radius: f64) {
        self.darkness = Some((center, radius));
    }

    fn draw_character(&mut self, character: &Character) {
        self.character = Some(CharacterSprite {
            position: character.position,
            orientation: character.orientation,
            held: character.inventory.len(),
            score: character.score,
        });
    }

    fn release(&mut self) {
        self.tiles.clear();
        self.darkness = None;
    }
}

/// Gets the display color for a tile type.
fn tile_color(tile: TileType) -> Color {
    match tile {
        TileType::Ground => Color::new(0.35, 0.27, 0.2, 1.0),
        TileType::Rock => Color::new(0.2, 0.2, 0.22, 1.0),
        TileType::Crystal => SKYBLUE,
        TileType::Stone(_) => Color::new(0.35, 0.27, 0.2, 1.0),
        TileType::Beacon { active: true } => GOLD,
        TileType::Beacon { active: false } => DARKGRAY,
        TileType::Blank => BLACK,
    }
}

fn stone_color(stone: PreciousStone) -> Color {
    match stone {
        PreciousStone::Ruby | PreciousStone::Garnet => RED,
        PreciousStone::Emerald | PreciousStone::Jade | PreciousStone::Malachite => GREEN,
        PreciousStone::Sapphire | PreciousStone::LapisLazuli | PreciousStone::Azurite => BLUE,
        PreciousStone::Amethyst | PreciousStone::Fluorine => PURPLE,
        PreciousStone::Amber | PreciousStone::Citrine | PreciousStone::TigerEye => ORANGE,
        PreciousStone::Obsidian | PreciousStone::Onyx => BLACK,
        PreciousStone::RoseQuartz => PINK,
        PreciousStone::Turquoise | PreciousStone::Aventurine => LIME,
        PreciousStone::Diamond | PreciousStone::Opal | PreciousStone::Agate => WHITE,
    }
}

/// Unit-ish vector the sprite looks along, world axes.
fn orientation_offset(orientation: DisplayOrientation) -> (f32, f32) {
    match orientation {
        DisplayOrientation::Front => (0.0, -1.0),
        DisplayOrientation::Back => (0.0, 1.0),
        DisplayOrientation::Left => (-1.0, 0.0),
        DisplayOrientation::Right => (1.0, 0.0),
        DisplayOrientation::LeftFront => (-0.7, -0.7),
        DisplayOrientation::RightFront => (0.7, -0.7),
        DisplayOrientation::LeftBack => (-0.7, 0.7),
        DisplayOrientation::RightBack => (0.7, 0.7),
    }
}
