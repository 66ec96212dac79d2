//! End-to-end checks of the exploration session driven through `tick`.

use std::collections::HashSet;
use world_explorer::{
    ChunkOffset, ExplorationSession, ExplorerResult, HeldItem, InputState, JsonFileStore,
    MemoryStore, PersistentProfile, Point, Position, PreciousStone, ProfileManager,
    RecordingAudio, RecordingRenderer, SessionConfig, SessionPhase, SoundId, TileType,
};

type TestSession<'p> = ExplorationSession<'p, RecordingRenderer, RecordingAudio>;

fn session(profile: &mut ProfileManager, config: SessionConfig) -> TestSession<'_> {
    ExplorationSession::new(config, profile, RecordingRenderer::new(), RecordingAudio::new())
}

fn run_until_active(session: &mut TestSession<'_>) -> ExplorerResult<()> {
    let mut input = InputState::new();
    for _ in 0..200 {
        if session.phase() == SessionPhase::Active {
            return Ok(());
        }
        session.tick(&mut input)?;
    }
    panic!("session never became active");
}

#[test]
fn test_tutorial_lights_first_beacon() -> ExplorerResult<()> {
    for seed in [1, 2, 3, 40, 777] {
        let mut profile = ProfileManager::in_memory();
        let config = SessionConfig {
            tutorial: true,
            ..SessionConfig::for_testing(seed)
        };
        let mut session = session(&mut profile, config);

        session.tick(&mut InputState::new())?;
        assert_eq!(session.phase(), SessionPhase::Tutorial);
        run_until_active(&mut session)?;

        assert_eq!(session.character().score, 6, "seed {}", seed);
        assert!(session.character().inventory.is_empty());
        assert_eq!(
            session.world().get(Position::new(5, 4)),
            TileType::Beacon { active: true }
        );
        assert_eq!(session.world().get(Position::new(4, 4)), TileType::Ground);
        assert_eq!(session.beacon().intensity, 100.0);
        assert_eq!(session.darkness().radius, 4.0);
        assert_eq!(session.audio().count(SoundId::StartBeacon), 1);
        assert_eq!(session.audio().count(SoundId::GetCrystal), 1);
    }
    Ok(())
}

#[test]
fn test_game_over_records_high_score() -> ExplorerResult<()> {
    let mut profile = ProfileManager::in_memory();
    {
        let mut session = session(&mut profile, SessionConfig::for_testing(21));
        run_until_active(&mut session)?;
        session.character_mut().score = 7;
        session.character_mut().position = Point::new(-8.5, -8.5);

        let mut input = InputState::new();
        for _ in 0..300 {
            session.tick(&mut input)?;
        }
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.dark_ticks(), 300);

        session.tick(&mut input)?;
        assert_eq!(
            session.phase(),
            SessionPhase::GameOverPending { remaining: 60 }
        );
        assert_eq!(session.audio().count(SoundId::Death), 1);
        assert_eq!(session.darkness().radius, 0.0);

        // Input is ignored while the game-over screen is up
        input.press("d");
        for _ in 0..59 {
            session.tick(&mut input)?;
        }
        assert!(!session.is_terminated());
        assert_eq!(session.character().position, Point::new(-8.5, -8.5));

        session.tick(&mut input)?;
        assert!(session.is_terminated());
        assert_eq!(session.final_score(), Some(7));
        assert!(session.renderer().released);
    }
    assert_eq!(profile.high_score(), 7);
    Ok(())
}

#[test]
fn test_lower_score_keeps_high_score() -> ExplorerResult<()> {
    let stored = PersistentProfile {
        high_score: 50,
        ..Default::default()
    };
    let mut profile = ProfileManager::load(Box::new(MemoryStore::with_profile(stored)))?;
    {
        let mut session = session(&mut profile, SessionConfig::for_testing(22));
        run_until_active(&mut session)?;
        session.character_mut().score = 3;
        session.character_mut().position = Point::new(-8.5, -8.5);

        let mut input = InputState::new();
        for _ in 0..400 {
            session.tick(&mut input)?;
        }
        assert_eq!(session.final_score(), Some(3));
    }
    assert_eq!(profile.high_score(), 50);
    Ok(())
}

#[test]
fn test_leaving_the_dark_resets_counter() -> ExplorerResult<()> {
    let mut profile = ProfileManager::in_memory();
    let mut session = session(&mut profile, SessionConfig::for_testing(23));
    run_until_active(&mut session)?;

    let mut input = InputState::new();
    session.character_mut().position = Point::new(-8.5, -8.5);
    for expected in 1..=10 {
        session.tick(&mut input)?;
        assert_eq!(session.dark_ticks(), expected);
    }
    assert_eq!(session.audio().played.iter().filter(|p| **p == (SoundId::Darkness, true)).count(), 1);

    session.character_mut().position = Point::new(4.5, 5.5);
    session.tick(&mut input)?;
    assert_eq!(session.dark_ticks(), 0);
    assert!(session.audio().faded.contains(&SoundId::Darkness));
    Ok(())
}

#[test]
fn test_crossing_a_chunk_generates_neighbors() -> ExplorerResult<()> {
    let mut profile = ProfileManager::in_memory();
    let mut session = session(&mut profile, SessionConfig::for_testing(24));
    run_until_active(&mut session)?;
    assert_eq!(session.world().chunks().len(), 9);

    for x in 4..14 {
        session.world_mut().set(Position::new(x, 5), TileType::Ground);
    }
    session.renderer_mut().clear_history();

    let mut input = InputState::new();
    input.press("d");
    for _ in 0..200 {
        session.tick(&mut input)?;
        if session.character().tile().x >= 11 {
            break;
        }
    }

    assert_eq!(
        session.world().chunk_of(session.character().tile()),
        Some(ChunkOffset::new(1, 0))
    );
    assert_eq!(session.world().chunks().len(), 12);
    for y in -1..=1 {
        assert!(session.world().contains_chunk(ChunkOffset::new(2, y)));
    }

    // The window only sends changes: nothing is placed twice while shown
    let renderer = session.renderer();
    let placed: HashSet<Position> = renderer.placed.iter().copied().collect();
    assert_eq!(placed.len(), renderer.placed.len());
    assert!(renderer.shown.values().all(|tile| *tile != TileType::Blank));
    assert!(!renderer.removed.is_empty());
    Ok(())
}

#[test]
fn test_stones_reach_profile_file() -> ExplorerResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("profile.json");

    let mut profile = ProfileManager::load(Box::new(JsonFileStore::new(&path)))?;
    {
        let mut session = session(&mut profile, SessionConfig::for_testing(25));
        run_until_active(&mut session)?;
        session.world_mut().set(Position::new(4, 4), TileType::Ground);
        session.world_mut().set(
            Position::new(4, 3),
            TileType::Stone(PreciousStone::Sapphire),
        );

        let mut input = InputState::new();
        // Walk down onto the stone, pick it up, then face the beacon
        input.press("s");
        for _ in 0..25 {
            session.tick(&mut input)?;
        }
        input.release("s");
        input.release("space");
        session.tick(&mut input)?;
        assert_eq!(
            session.character().inventory.items(),
            &[HeldItem::Stone(PreciousStone::Sapphire)]
        );

        session.character_mut().position = Point::new(4.8, 4.5);
        session.character_mut().facing = world_explorer::Facing::Right;
        input.release("space");
        session.tick(&mut input)?;
        assert_eq!(
            session.world().get(Position::new(5, 4)),
            TileType::Beacon { active: true }
        );
    }

    let reloaded = ProfileManager::load(Box::new(JsonFileStore::new(&path)))?;
    assert!(reloaded.collection().is_collected(PreciousStone::Sapphire));
    Ok(())
}

#[test]
fn test_teardown_skips_scoring() -> ExplorerResult<()> {
    let mut profile = ProfileManager::in_memory();
    {
        let mut session = session(&mut profile, SessionConfig::for_testing(26));
        run_until_active(&mut session)?;
        session.character_mut().score = 12;
        session.teardown();
        assert!(session.is_terminated());
        assert_eq!(session.final_score(), None);
    }
    assert_eq!(profile.high_score(), 0);
    Ok(())
}

/// Steps the character one tile to the right inside `chunk`, forcing a crossing.
fn cross_into(session: &mut TestSession<'_>, chunk: ChunkOffset) -> ExplorerResult<()> {
    let base = session
        .world()
        .world_position(chunk, 4, 4)
        .expect("world has rooms");
    session.world_mut().set(base, TileType::Ground);
    session
        .world_mut()
        .set(Position::new(base.x + 1, base.y), TileType::Ground);
    session.character_mut().position = Point::new(base.x as f64 + 0.95, base.y as f64 + 0.5);

    let mut input = InputState::new();
    input.press("d");
    session.tick(&mut input)?;
    assert_eq!(session.world().chunk_of(session.character().tile()), Some(chunk));
    Ok(())
}

#[test]
fn test_revivals_plan_the_next_beacon_room() -> ExplorerResult<()> {
    for seed in 1..=5 {
        let mut profile = ProfileManager::in_memory();
        let config = SessionConfig {
            tutorial: true,
            ..SessionConfig::for_testing(seed)
        };
        let mut session = session(&mut profile, config);
        run_until_active(&mut session)?;

        let bias = session.bias();
        let axes = [ChunkOffset::new(bias.x, 0), ChunkOffset::new(0, bias.y)];
        assert_eq!(session.beacon_rooms().len(), 2);

        // Every neighbour of the spawn room exists, so the plan reaches two chunks out
        let planned = session.next_beacon_room().expect("a beacon room is planned");
        let axis = *axes
            .iter()
            .find(|axis| planned == **axis + **axis)
            .unwrap_or_else(|| panic!("seed {}: unexpected plan {:?}", seed, planned));
        assert!(!session.world().contains_chunk(planned));

        cross_into(&mut session, axis)?;
        assert_eq!(session.beacon_rooms()[2], planned, "seed {}", seed);
        assert_eq!(session.next_beacon_room(), None);
        let far_beacon = session
            .world()
            .world_position(planned, 5, 5)
            .expect("world has rooms");
        assert_eq!(
            session.world().get(far_beacon),
            TileType::Beacon { active: false }
        );

        // Relight the far beacon; one of its missing neighbours gets the next one
        let west = Position::new(far_beacon.x - 1, far_beacon.y);
        session.world_mut().set(west, TileType::Ground);
        session.character_mut().inventory.add(HeldItem::Crystal);
        session.character_mut().position = Point::new(west.x as f64 + 0.8, west.y as f64 + 0.5);
        session.character_mut().facing = world_explorer::Facing::Right;
        let mut input = InputState::new();
        input.release("space");
        session.tick(&mut input)?;

        assert_eq!(session.world().get(far_beacon), TileType::Beacon { active: true });
        assert_eq!(session.world().get(Position::new(5, 4)), TileType::Rock);
        assert_eq!(session.beacon_rooms().len(), 4, "seed {}", seed);
        let fourth = session.beacon_rooms()[3];
        let candidates = [planned + axes[0], planned + axes[1], planned + bias];
        assert!(candidates.contains(&fourth), "seed {}: {:?}", seed, fourth);
        for neighbor in planned.neighbors() {
            assert!(session.world().contains_chunk(neighbor));
        }
    }
    Ok(())
}

#[test]
fn test_revival_redraws_the_preferred_axis() -> ExplorerResult<()> {
    let mut switched = 0;
    for seed in 1..=20 {
        let mut profile = ProfileManager::in_memory();
        let config = SessionConfig {
            tutorial: true,
            ..SessionConfig::for_testing(seed)
        };
        let mut session = session(&mut profile, config);
        run_until_active(&mut session)?;

        let first = session.beacon_rooms()[1];
        let planned = session.next_beacon_room().expect("a beacon room is planned");
        if planned != first + first {
            switched += 1;
        }
    }
    assert!(switched > 0);
    Ok(())
}
