//! # Connectivity
//!
//! Breadth-first reachability inside a single room, used to validate that
//! carving joined a beacon to every side of its room.

use crate::{Position, Room, TileType};
use pathfinding::prelude::bfs_reach;

/// Cells a carved path may run through.
fn is_traversable(tile: TileType) -> bool {
    matches!(tile, TileType::Ground | TileType::Crystal)
}

/// Whether `to` can be reached from `from` over 4-connected Ground and
/// Crystal cells.
///
/// The start cell itself is accepted whatever it holds, so a beacon can
/// serve as the origin. Points outside the room are never reachable.
///
/// # Examples
///
/// ```
/// use world_explorer::{reachable, Position, Room, TileType};
///
/// let mut room = Room::filled(3, 3, TileType::Rock);
/// room.set(Position::new(1, 0), TileType::Ground);
/// room.set(Position::new(1, 1), TileType::Crystal);
///
/// assert!(reachable(&room, Position::new(1, 2), Position::new(1, 0)));
/// assert!(!reachable(&room, Position::new(1, 2), Position::new(0, 0)));
/// ```
pub fn reachable(room: &Room, from: Position, to: Position) -> bool {
    if !room.contains(from) || !room.contains(to) {
        return false;
    }

    bfs_reach(from, |&pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| room.get(next).is_some_and(is_traversable))
    })
    .any(|pos| pos == to)
}

/// Checks every `(from, to)` pair, stopping at the first unreachable one.
pub fn all_reachable(room: &Room, pairs: &[(Position, Position)]) -> bool {
    pairs.iter().all(|&(from, to)| reachable(room, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_room() -> Room {
        // Rock room with a single horizontal corridor through row 2
        let mut room = Room::filled(5, 5, TileType::Rock);
        for x in 0..5 {
            room.set(Position::new(x, 2), TileType::Ground);
        }
        room
    }

    #[test]
    fn test_corridor_is_reachable() {
        let room = corridor_room();
        assert!(reachable(&room, Position::new(0, 2), Position::new(4, 2)));
        assert!(reachable(&room, Position::new(4, 2), Position::new(0, 2)));
    }

    #[test]
    fn test_rock_blocks() {
        let mut room = corridor_room();
        room.set(Position::new(2, 2), TileType::Rock);
        assert!(!reachable(&room, Position::new(0, 2), Position::new(4, 2)));
    }

    #[test]
    fn test_crystal_is_traversable_stone_is_not() {
        let mut room = corridor_room();
        room.set(Position::new(2, 2), TileType::Crystal);
        assert!(reachable(&room, Position::new(0, 2), Position::new(4, 2)));

        room.set(Position::new(2, 2), TileType::Stone(crate::PreciousStone::Opal));
        assert!(!reachable(&room, Position::new(0, 2), Position::new(4, 2)));
    }

    #[test]
    fn test_no_diagonal_steps() {
        let mut room = Room::filled(3, 3, TileType::Rock);
        room.set(Position::new(0, 0), TileType::Ground);
        room.set(Position::new(1, 1), TileType::Ground);
        assert!(!reachable(&room, Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_start_on_beacon() {
        let mut room = corridor_room();
        room.set(Position::new(2, 2), TileType::Beacon { active: false });
        assert!(reachable(&room, Position::new(2, 2), Position::new(0, 2)));
        assert!(reachable(&room, Position::new(2, 2), Position::new(4, 2)));
        // A beacon in the middle of a path still blocks it
        assert!(!reachable(&room, Position::new(0, 2), Position::new(4, 2)));
    }

    #[test]
    fn test_out_of_bounds() {
        let room = corridor_room();
        assert!(!reachable(&room, Position::new(-1, 2), Position::new(4, 2)));
        assert!(!reachable(&room, Position::new(0, 2), Position::new(5, 2)));
    }

    #[test]
    fn test_all_reachable() {
        let room = corridor_room();
        let origin = Position::new(2, 2);
        assert!(all_reachable(&room, &[(origin, Position::new(0, 2)), (origin, Position::new(4, 2))]));
        assert!(!all_reachable(&room, &[(origin, Position::new(2, 0))]));
    }
}
