//! # Chunked World
//!
//! An unbounded tile space stitched together from generated rooms.
//!
//! Rooms are placed at integer chunk offsets. Room storage runs top row
//! first while world `y` grows upward, so the row index is inverted when a
//! room is stitched in. Coordinates that no room covers read as
//! [`TileType::Blank`].

use crate::{ExplorerError, ExplorerResult, Position, Room, TileType};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Integer offset of a room inside the chunked world, in room units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkOffset {
    pub x: i32,
    pub y: i32,
}

impl ChunkOffset {
    /// Creates a new chunk offset.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk holding the world origin.
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// The 8 chunks surrounding this one.
    pub fn neighbors(self) -> Vec<ChunkOffset> {
        let mut neighbors = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if (dx, dy) != (0, 0) {
                    neighbors.push(ChunkOffset::new(self.x + dx, self.y + dy));
                }
            }
        }
        neighbors
    }
}

impl std::ops::Add for ChunkOffset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Sparse world map keyed by tile coordinate.
///
/// # Examples
///
/// ```
/// use world_explorer::{ChunkedWorld, ChunkOffset, Position, Room, TileType};
///
/// let mut world = ChunkedWorld::new();
/// world.insert(&Room::filled(4, 4, TileType::Ground), ChunkOffset::new(1, 0)).unwrap();
///
/// assert_eq!(world.get(Position::new(4, 0)), TileType::Ground);
/// assert_eq!(world.get(Position::new(0, 0)), TileType::Blank);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChunkedWorld {
    tiles: HashMap<Position, TileType>,
    room_size: Option<(usize, usize)>,
    chunks: Vec<ChunkOffset>,
    chunk_set: HashSet<ChunkOffset>,
}

impl ChunkedWorld {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stitches a room into the world at the given chunk offset.
    ///
    /// Fails with [`ExplorerError::DimensionMismatch`] when the room is not
    /// the same size as the first room inserted. Inserting twice at the same
    /// offset overwrites the earlier tiles.
    pub fn insert(&mut self, room: &Room, offset: ChunkOffset) -> ExplorerResult<()> {
        let found = (room.width(), room.height());
        match self.room_size {
            None => self.room_size = Some(found),
            Some(expected) if expected != found => {
                return Err(ExplorerError::DimensionMismatch { expected, found });
            }
            Some(_) => {}
        }

        let (width, height) = found;
        let origin_x = offset.x * width as i32;
        let origin_y = offset.y * height as i32;

        for row in 0..height {
            for column in 0..width {
                let tile = room.tile_at(column, row);
                let world_pos = Position::new(
                    origin_x + column as i32,
                    origin_y + (height - 1 - row) as i32,
                );
                self.tiles.insert(world_pos, tile);
            }
        }

        if self.chunk_set.insert(offset) {
            self.chunks.push(offset);
        }
        log::trace!("Stitched room at chunk {:?}", offset);
        Ok(())
    }

    /// Returns the tile at a coordinate, [`TileType::Blank`] when unexplored.
    pub fn get(&self, pos: Position) -> TileType {
        self.tiles.get(&pos).copied().unwrap_or(TileType::Blank)
    }

    /// Overwrites the tile at a coordinate.
    pub fn set(&mut self, pos: Position, tile: TileType) {
        self.tiles.insert(pos, tile);
    }

    /// Dimensions shared by every room in the world, once one is inserted.
    pub fn room_size(&self) -> Option<(usize, usize)> {
        self.room_size
    }

    /// Whether a room has been stitched at this offset.
    pub fn contains_chunk(&self, offset: ChunkOffset) -> bool {
        self.chunk_set.contains(&offset)
    }

    /// Chunk offsets in insertion order.
    pub fn chunks(&self) -> &[ChunkOffset] {
        &self.chunks
    }

    /// The chunk a coordinate falls into, once the room size is known.
    pub fn chunk_of(&self, pos: Position) -> Option<ChunkOffset> {
        self.room_size.map(|(width, height)| {
            ChunkOffset::new(
                pos.x.div_euclid(width as i32),
                pos.y.div_euclid(height as i32),
            )
        })
    }

    /// World coordinate of a room cell inside a chunk.
    pub fn world_position(&self, offset: ChunkOffset, column: usize, row: usize) -> Option<Position> {
        self.room_size.map(|(width, height)| {
            Position::new(
                offset.x * width as i32 + column as i32,
                offset.y * height as i32 + (height - 1 - row) as i32,
            )
        })
    }

    /// Number of tiles written so far.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no room has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl fmt::Display for ChunkedWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(min_x) = self.tiles.keys().map(|p| p.x).min() else {
            return Ok(());
        };
        let max_x = self.tiles.keys().map(|p| p.x).max().unwrap_or(min_x);
        let min_y = self.tiles.keys().map(|p| p.y).min().unwrap_or(0);
        let max_y = self.tiles.keys().map(|p| p.y).max().unwrap_or(min_y);

        for y in (min_y..=max_y).rev() {
            for x in min_x..=max_x {
                match self.tiles.get(&Position::new(x, y)) {
                    Some(tile) => write!(f, "{:<2} ", tile.code())?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
