//! # Room Generator
//!
//! Builds one square room: rock everywhere, scattered crystals and precious
//! stones, open side midpoints, an optional beacon, and passages dug by short
//! random walks from every anchor cell.
//!
//! Beacon rooms are re-dug with longer walks until the beacon reaches all
//! four side midpoints.

use super::{all_reachable, take_stone, GenerationConfig, Generator, Room, StoneSet};
use crate::{CollectionRecord, ExplorerError, ExplorerResult, Facing, Position, TileType};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Output of one room generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRoom {
    pub room: Room,
    /// Stone kinds placed in the world so far, including this room's
    pub excluded_stones: StoneSet,
}

/// Generator for a single room of the chunked world.
///
/// # Examples
///
/// ```
/// use world_explorer::{reachable, utils, GenerationConfig, Generator, RoomGenerator, TileType};
///
/// let config = GenerationConfig::new(11);
/// let mut rng = utils::create_rng(&config);
/// let generated = RoomGenerator::new(true).generate(&config, &mut rng).unwrap();
///
/// let room = &generated.room;
/// assert_eq!(room.get(room.center()), Some(TileType::Beacon { active: false }));
/// for midpoint in room.side_midpoints() {
///     assert!(reachable(room, room.center(), midpoint));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoomGenerator<'a> {
    with_beacon: bool,
    excluded: StoneSet,
    collection: Option<&'a CollectionRecord>,
}

impl<'a> RoomGenerator<'a> {
    /// Creates a generator, with or without a beacon at the room centre.
    pub fn new(with_beacon: bool) -> Self {
        Self {
            with_beacon,
            excluded: StoneSet::new(),
            collection: None,
        }
    }

    /// Stone kinds already placed elsewhere in the world.
    pub fn excluding(mut self, excluded: StoneSet) -> Self {
        self.excluded = excluded;
        self
    }

    /// The player's collection; collected kinds are never generated.
    pub fn with_collection(mut self, collection: &'a CollectionRecord) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Rock everywhere, then resources, midpoints and the beacon clearing.
    ///
    /// Returns the pre-dig grid and its anchors, in placement order.
    fn lay_out(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
        excluded: &mut StoneSet,
    ) -> (Room, Vec<Position>) {
        let size = config.map_size;
        let mut room = Room::filled(size, size, TileType::Rock);
        let mut anchors = Vec::new();

        let crystal_chance = config.crystal_probability.clamp(0.0, 1.0);
        for row in 0..size {
            for column in 0..size {
                if rng.gen_bool(crystal_chance) {
                    let pos = Position::new(column as i32, row as i32);
                    room.set(pos, TileType::Crystal);
                    anchors.push(pos);
                }
            }
        }

        let empty = CollectionRecord::default();
        let collection = self.collection.unwrap_or(&empty);
        let stone_chance = config.precious_stone_probability.clamp(0.0, 1.0);
        for row in 0..size {
            for column in 0..size {
                if !rng.gen_bool(stone_chance) {
                    continue;
                }
                if let Some(stone) = take_stone(rng, excluded, collection) {
                    let pos = Position::new(column as i32, row as i32);
                    room.set(pos, TileType::Stone(stone));
                    anchors.push(pos);
                }
            }
        }

        for midpoint in room.side_midpoints() {
            room.set(midpoint, TileType::Ground);
            anchors.push(midpoint);
        }

        if self.with_beacon {
            let center = room.center();
            for pos in center.square_around(1) {
                room.set(pos, TileType::Ground);
            }
            room.set(center, TileType::Beacon { active: false });
            let west = Position::new(center.x - 1, center.y);
            room.set(west, TileType::Crystal);

            for pos in [center, west] {
                if !anchors.contains(&pos) {
                    anchors.push(pos);
                }
            }
        }

        (room, anchors)
    }

    /// One digging pass over a copy of the pre-dig grid.
    ///
    /// Each walk starts at an initial anchor. Every carved cell joins the
    /// anchor set, so later steps never re-enter it.
    fn dig(
        &self,
        grid: &Room,
        anchors: &[Position],
        steps: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Room {
        let mut room = grid.clone();
        let mut anchor_set: HashSet<Position> = anchors.iter().copied().collect();
        let directions = Facing::all();

        for &start in anchors {
            let mut position = start;
            for _ in 0..steps {
                let mut carved = false;
                for _ in 0..config.number_trials {
                    let direction = directions[rng.gen_range(0..directions.len())];
                    let next = position + direction.to_delta();
                    if room.contains(next) && !anchor_set.contains(&next) {
                        room.set(next, TileType::Ground);
                        anchor_set.insert(next);
                        position = next;
                        carved = true;
                        break;
                    }
                }
                if !carved {
                    break;
                }
            }
        }

        room
    }

    /// Pairs that must be joined for the room to be accepted.
    fn required_pairs(&self, room: &Room) -> Vec<(Position, Position)> {
        if !self.with_beacon {
            return Vec::new();
        }
        let center = room.center();
        room.side_midpoints()
            .iter()
            .map(|&midpoint| (center, midpoint))
            .collect()
    }
}

impl Generator<GeneratedRoom> for RoomGenerator<'_> {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ExplorerResult<GeneratedRoom> {
        let mut excluded = self.excluded.clone();
        let (grid, anchors) = self.lay_out(config, rng, &mut excluded);
        let pairs = self.required_pairs(&grid);

        let mut steps = config.number_cases_digger;
        for round in 1..=config.max_carve_rounds.max(1) {
            let room = self.dig(&grid, &anchors, steps, config, rng);
            if all_reachable(&room, &pairs) {
                log::debug!(
                    "Generated {}x{} room (beacon: {}) after {} carving round(s)",
                    room.width(),
                    room.height(),
                    self.with_beacon,
                    round
                );
                return Ok(GeneratedRoom {
                    room,
                    excluded_stones: excluded,
                });
            }
            steps += 1;
        }

        log::warn!(
            "Beacon room still disconnected after {} carving rounds",
            config.max_carve_rounds
        );
        Err(ExplorerError::MapGenerationExhausted {
            rounds: config.max_carve_rounds,
        })
    }

    fn validate(&self, content: &GeneratedRoom, config: &GenerationConfig) -> ExplorerResult<()> {
        let room = &content.room;
        if room.width() != config.map_size || room.height() != config.map_size {
            return Err(ExplorerError::GenerationFailed(format!(
                "room is {}x{}, expected {}x{}",
                room.width(),
                room.height(),
                config.map_size,
                config.map_size
            )));
        }

        if let Some(midpoint) = room
            .side_midpoints()
            .into_iter()
            .find(|&midpoint| room.get(midpoint) != Some(TileType::Ground))
        {
            return Err(ExplorerError::GenerationFailed(format!(
                "side midpoint {:?} is not open",
                midpoint
            )));
        }

        if !all_reachable(room, &self.required_pairs(room)) {
            return Err(ExplorerError::GenerationFailed(
                "beacon does not reach every side".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        if self.with_beacon {
            "BeaconRoomGenerator"
        } else {
            "RoomGenerator"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;
    use crate::{reachable, PreciousStone};

    fn bare_config(seed: u64) -> GenerationConfig {
        GenerationConfig {
            crystal_probability: 0.0,
            precious_stone_probability: 0.0,
            number_cases_digger: 0,
            ..GenerationConfig::new(seed)
        }
    }

    #[test]
    fn test_zero_probability_room_is_rock_with_open_midpoints() {
        let config = bare_config(1);
        let mut rng = utils::create_rng(&config);
        let generated = RoomGenerator::new(false).generate(&config, &mut rng).unwrap();
        let room = &generated.room;

        let midpoints = room.side_midpoints();
        for (pos, tile) in room.cells() {
            if midpoints.contains(&pos) {
                assert_eq!(tile, TileType::Ground);
            } else {
                assert_eq!(tile, TileType::Rock, "unexpected tile at {:?}", pos);
            }
        }
        assert!(generated.excluded_stones.is_empty());
    }

    #[test]
    fn test_beacon_clearing_layout() {
        let config = GenerationConfig::for_testing(5);
        let mut rng = utils::create_rng(&config);
        let room = RoomGenerator::new(true).generate(&config, &mut rng).unwrap().room;

        let center = room.center();
        assert_eq!(room.get(center), Some(TileType::Beacon { active: false }));
        assert_eq!(room.get(Position::new(center.x - 1, center.y)), Some(TileType::Crystal));
        for pos in center.square_around(1) {
            if pos != center && pos != Position::new(center.x - 1, center.y) {
                assert_eq!(room.get(pos), Some(TileType::Ground));
            }
        }
        assert_eq!(room.count(TileType::Crystal), 1);
    }

    #[test]
    fn test_beacon_rooms_connect_for_many_seeds() {
        for seed in 0..40 {
            let config = GenerationConfig::new(seed);
            let mut rng = utils::create_rng(&config);
            let generator = RoomGenerator::new(true);
            let generated = generator.generate(&config, &mut rng).unwrap();
            let room = &generated.room;
            for midpoint in room.side_midpoints() {
                assert!(reachable(room, room.center(), midpoint), "seed {}", seed);
            }
            generator.validate(&generated, &config).unwrap();
        }
    }

    #[test]
    fn test_carving_needs_rounds_from_zero_steps() {
        // Zero-length walks cannot connect anything, so later rounds must
        let config = bare_config(8);
        let mut rng = utils::create_rng(&config);
        let room = RoomGenerator::new(true).generate(&config, &mut rng).unwrap().room;
        assert!(room.count(TileType::Ground) > 12);
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let config = GenerationConfig {
            max_carve_rounds: 1,
            ..bare_config(2)
        };
        let mut rng = utils::create_rng(&config);
        let result = RoomGenerator::new(true).generate(&config, &mut rng);
        assert!(matches!(
            result,
            Err(ExplorerError::MapGenerationExhausted { rounds: 1 })
        ));
    }

    #[test]
    fn test_stones_are_unique_across_rooms() {
        let config = GenerationConfig {
            precious_stone_probability: 0.2,
            ..GenerationConfig::new(4)
        };
        let mut rng = utils::create_rng(&config);

        let mut excluded = StoneSet::new();
        let mut seen = Vec::new();
        for _ in 0..5 {
            let generated = RoomGenerator::new(false)
                .excluding(excluded.clone())
                .generate(&config, &mut rng)
                .unwrap();
            for (_, tile) in generated.room.cells() {
                if let TileType::Stone(stone) = tile {
                    assert!(!seen.contains(&stone));
                    seen.push(stone);
                }
            }
            excluded = generated.excluded_stones;
        }
        assert!(seen.iter().all(|stone| excluded.contains(stone)));
        assert!(excluded.len() <= PreciousStone::ALL.len());
    }

    #[test]
    fn test_collected_stones_never_generated() {
        let mut collection = CollectionRecord::default();
        for stone in PreciousStone::ALL {
            collection.record(stone);
        }
        let config = GenerationConfig {
            precious_stone_probability: 1.0,
            ..GenerationConfig::new(6)
        };
        let mut rng = utils::create_rng(&config);
        let generated = RoomGenerator::new(false)
            .with_collection(&collection)
            .generate(&config, &mut rng)
            .unwrap();
        assert!(generated
            .room
            .cells()
            .all(|(_, tile)| !matches!(tile, TileType::Stone(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_size() {
        let config = GenerationConfig::new(0);
        let generator = RoomGenerator::new(false);
        let content = GeneratedRoom {
            room: Room::filled(4, 4, TileType::Ground),
            excluded_stones: StoneSet::new(),
        };
        assert!(matches!(
            generator.validate(&content, &config),
            Err(ExplorerError::GenerationFailed(_))
        ));
        assert_eq!(generator.generator_type(), "RoomGenerator");
    }
}
