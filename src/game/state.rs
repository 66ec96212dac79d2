//! # Exploration Session
//!
//! The per-game state machine. One [`ExplorationSession::tick`] call advances
//! the game by one fixed step; the current [`SessionPhase`] decides what that
//! step does.
//!
//! The session owns the world, the character and the beacon. It borrows the
//! player's profile for the whole game, and drives a renderer and an audio
//! player that it owns.

use crate::config::{
    FPS, GAME_OVER_FREEZE_TIME, MAX_TIME_IN_DARK, PROBABILITY_WATER_DROPS, REVIVAL_BONUS,
    SOUND_RADIUS_BEACON, SOUND_RADIUS_CRYSTAL, SPEED,
};
use crate::generation::utils;
use crate::{
    AudioPlayer, Beacon, Capability, Character, ChunkOffset, ChunkedWorld, Darkness,
    ExplorerError, ExplorerResult, FrameInput, GenerationConfig, Generator, HeldItem, InputState,
    Point, Position, PreciousStone, ProfileManager, Renderer, RoomGenerator, SoundId, StoneSet,
    TileType, TutorialScript, Viewport,
};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Runtime settings of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Room generation settings; its seed drives the whole session
    pub generation: GenerationConfig,
    /// Ticks per second
    pub tick_rate: u32,
    /// Tiles travelled per tick at full input
    pub speed: f64,
    pub viewport: Viewport,
    /// Play the scripted tutorial before handing control to the player
    pub tutorial: bool,
    /// Chance per tick of an ambient water drop
    pub water_drop_probability: f64,
    /// Seconds the character survives outside the light
    pub max_time_in_dark: u32,
    /// Seconds the game-over screen stays up
    pub game_over_freeze_time: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

impl SessionConfig {
    /// Creates the default session configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::SessionConfig;
    ///
    /// let config = SessionConfig::new(99);
    /// assert_eq!(config.seed(), 99);
    /// assert_eq!(config.tick_rate, 30);
    /// assert!(config.tutorial);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::new(seed),
            tick_rate: FPS,
            speed: SPEED,
            viewport: Viewport::default(),
            tutorial: true,
            water_drop_probability: PROBABILITY_WATER_DROPS,
            max_time_in_dark: MAX_TIME_IN_DARK,
            game_over_freeze_time: GAME_OVER_FREEZE_TIME,
        }
    }

    /// Resource-free rooms, no tutorial and no ambience.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::for_testing(seed),
            tutorial: false,
            water_drop_probability: 0.0,
            ..Self::new(seed)
        }
    }

    /// Reads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> ExplorerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn seed(&self) -> u64 {
        self.generation.seed
    }

    /// Ticks spent in the dark before the character dies.
    pub fn dark_tick_budget(&self) -> u32 {
        self.max_time_in_dark * self.tick_rate
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing generated yet; the first tick builds the world
    Initializing,
    /// Scripted input is playing
    Tutorial,
    /// The player is in control
    Active,
    /// The character died; input is frozen for the remaining ticks
    GameOverPending { remaining: u32 },
    /// The session is over; further ticks do nothing
    Terminated,
}

/// One game, from world generation to game over.
///
/// # Examples
///
/// ```
/// use world_explorer::{
///     ExplorationSession, InputState, ProfileManager, RecordingAudio, RecordingRenderer,
///     SessionConfig, SessionPhase,
/// };
///
/// let mut profile = ProfileManager::in_memory();
/// let mut session = ExplorationSession::new(
///     SessionConfig::for_testing(1),
///     &mut profile,
///     RecordingRenderer::new(),
///     RecordingAudio::new(),
/// );
///
/// let mut input = InputState::new();
/// session.tick(&mut input).unwrap();
/// assert_eq!(session.phase(), SessionPhase::Active);
/// assert_eq!(session.world().chunks().len(), 9);
/// ```
pub struct ExplorationSession<'p, R: Renderer, A: AudioPlayer> {
    config: SessionConfig,
    profile: &'p mut ProfileManager,
    renderer: R,
    audio: A,
    rng: StdRng,
    phase: SessionPhase,
    tutorial: Option<TutorialScript>,

    world: ChunkedWorld,
    excluded_stones: StoneSet,
    /// Diagonal direction the beacons drift toward
    bias: ChunkOffset,
    /// The single axis of `bias` tried first, redrawn on every revival
    preferred: ChunkOffset,
    /// Chunk that gets a beacon when it is generated
    planned_beacon: Option<ChunkOffset>,
    beacon_rooms: Vec<ChunkOffset>,
    current_chunk: ChunkOffset,

    character: Character,
    beacon: Beacon,
    darkness: Darkness,

    rendered: HashSet<Position>,
    frame: u64,
    dark_ticks: u32,
    near_crystal: bool,
    near_beacon: bool,
    final_score: Option<u32>,
}

impl<'p, R: Renderer, A: AudioPlayer> ExplorationSession<'p, R, A> {
    /// Creates a session. Nothing is generated until the first tick.
    pub fn new(config: SessionConfig, profile: &'p mut ProfileManager, renderer: R, audio: A) -> Self {
        let rng = utils::create_rng(&config.generation);
        Self {
            config,
            profile,
            renderer,
            audio,
            rng,
            phase: SessionPhase::Initializing,
            tutorial: None,
            world: ChunkedWorld::new(),
            excluded_stones: StoneSet::new(),
            bias: ChunkOffset::new(1, 1),
            preferred: ChunkOffset::new(1, 0),
            planned_beacon: None,
            beacon_rooms: Vec::new(),
            current_chunk: ChunkOffset::origin(),
            character: Character::new(Point::new(0.0, 0.0)),
            beacon: Beacon::new(Position::origin()),
            darkness: Darkness::new(),
            rendered: HashSet::new(),
            frame: 0,
            dark_ticks: 0,
            near_crystal: false,
            near_beacon: false,
            final_score: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &ChunkedWorld {
        &self.world
    }

    /// Direct world access for tools and tests.
    pub fn world_mut(&mut self) -> &mut ChunkedWorld {
        &mut self.world
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Direct character access for tools and tests.
    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn beacon(&self) -> &Beacon {
        &self.beacon
    }

    pub fn darkness(&self) -> &Darkness {
        &self.darkness
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn profile(&self) -> &ProfileManager {
        self.profile
    }

    /// Active-phase ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Consecutive ticks spent outside the light.
    pub fn dark_ticks(&self) -> u32 {
        self.dark_ticks
    }

    /// The diagonal direction beacons drift toward.
    pub fn bias(&self) -> ChunkOffset {
        self.bias
    }

    /// Chunks that received a beacon, in generation order.
    pub fn beacon_rooms(&self) -> &[ChunkOffset] {
        &self.beacon_rooms
    }

    /// The chunk that receives a beacon when it is generated, if any.
    pub fn next_beacon_room(&self) -> Option<ChunkOffset> {
        self.planned_beacon
    }

    /// The score reported at game over.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == SessionPhase::Terminated
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self, input: &mut InputState) -> ExplorerResult<()> {
        match self.phase {
            SessionPhase::Initializing => {
                input.take_released();
                self.initialize()
            }
            SessionPhase::Tutorial => {
                input.take_released();
                self.tutorial_tick()
            }
            SessionPhase::Active => {
                let frame = FrameInput::resolve(input, self.profile.keys());
                self.active_tick(frame)
            }
            SessionPhase::GameOverPending { remaining } => {
                input.take_released();
                self.game_over_tick(remaining)
            }
            SessionPhase::Terminated => Ok(()),
        }
    }

    /// Ends the session immediately without recording a score.
    pub fn teardown(&mut self) {
        if self.phase != SessionPhase::Terminated {
            log::info!("Session torn down in phase {:?}", self.phase);
            self.renderer.release();
            self.rendered.clear();
            self.phase = SessionPhase::Terminated;
        }
    }

    fn initialize(&mut self) -> ExplorerResult<()> {
        let bx = if self.rng.gen_bool(0.5) { 1 } else { -1 };
        let by = if self.rng.gen_bool(0.5) { 1 } else { -1 };
        self.bias = ChunkOffset::new(bx, by);
        self.preferred = self.draw_axis();
        log::info!(
            "Starting session with seed {} (bias {:?}, first beacon toward {:?})",
            self.config.seed(),
            self.bias,
            self.preferred
        );

        let origin = ChunkOffset::origin();
        self.generate_room(origin, true)?;
        self.planned_beacon = Some(origin + self.preferred);
        self.generate_missing_neighbors(origin)?;

        let size = self.config.generation.map_size;
        let beacon_tile = self
            .world
            .world_position(origin, size / 2, size / 2)
            .ok_or_else(|| ExplorerError::InvalidState("world has no rooms".to_string()))?;
        self.beacon = Beacon::new(beacon_tile);
        self.character = Character::new(Point::new(
            beacon_tile.x as f64 - 0.5,
            beacon_tile.y as f64 + 1.5,
        ));
        self.current_chunk = origin;

        self.update_window();
        self.renderer.draw_character(&self.character);
        self.renderer
            .draw_darkness(self.beacon.position, self.darkness.radius);

        if self.config.tutorial {
            self.tutorial = Some(TutorialScript::new(self.config.speed));
            self.phase = SessionPhase::Tutorial;
        } else {
            self.phase = SessionPhase::Active;
        }
        log::info!("World ready, entering {:?}", self.phase);
        Ok(())
    }

    fn tutorial_tick(&mut self) -> ExplorerResult<()> {
        let Some(script) = self.tutorial.as_mut() else {
            self.phase = SessionPhase::Active;
            return Ok(());
        };
        let next = script.next_frame();
        let finished = script.is_finished();

        if let Some(frame) = next {
            self.move_character(frame)?;
            self.update_window();
            for _ in 0..frame.interactions {
                self.interact()?;
            }
            self.renderer.draw_character(&self.character);
            self.renderer
                .draw_darkness(self.beacon.position, self.darkness.radius);
        }

        if finished {
            log::info!("Tutorial finished, handing over control");
            self.tutorial = None;
            self.phase = SessionPhase::Active;
        }
        Ok(())
    }

    fn active_tick(&mut self, frame: FrameInput) -> ExplorerResult<()> {
        self.frame += 1;

        if self.beacon.decay() {
            log::info!("Beacon at {:?} burnt out", self.beacon.tile());
            let tile = self.beacon.tile();
            self.set_tile(tile, TileType::Rock);
            self.darkness.collapse();
        }

        self.move_character(frame)?;
        self.update_window();
        self.proximity_sounds();

        if self.darkness.is_dark(self.beacon.position, self.character.position) {
            self.dark_ticks += 1;
            if self.dark_ticks == 1 {
                self.audio.play(SoundId::Darkness, true);
            }
            if self.dark_ticks > self.config.dark_tick_budget() {
                self.die();
                return Ok(());
            }
        } else {
            if self.dark_ticks > 0 {
                self.audio.fade_out(SoundId::Darkness, 1.0);
            }
            self.dark_ticks = 0;
        }

        for _ in 0..frame.interactions {
            self.interact()?;
        }

        self.renderer.draw_character(&self.character);
        self.renderer
            .draw_darkness(self.beacon.position, self.darkness.radius);

        let drop_chance = self.config.water_drop_probability.clamp(0.0, 1.0);
        if self.rng.gen_bool(drop_chance) {
            self.audio.play(SoundId::WaterDrop, false);
        }
        Ok(())
    }

    fn die(&mut self) {
        log::info!(
            "Lost in the dark after {} ticks, score {}",
            self.dark_ticks,
            self.character.score
        );
        self.audio.fade_out(SoundId::Darkness, 0.5);
        self.audio.play(SoundId::Death, false);
        self.darkness.collapse();
        self.renderer
            .draw_darkness(self.beacon.position, self.darkness.radius);
        self.phase = SessionPhase::GameOverPending {
            remaining: self.config.game_over_freeze_time * self.config.tick_rate,
        };
    }

    fn game_over_tick(&mut self, remaining: u32) -> ExplorerResult<()> {
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.phase = SessionPhase::GameOverPending { remaining };
            return Ok(());
        }

        let score = self.character.score;
        self.profile.update_high_score(score)?;
        self.final_score = Some(score);
        self.renderer.release();
        self.rendered.clear();
        self.phase = SessionPhase::Terminated;
        log::info!("Session over with score {}", score);
        Ok(())
    }

    /// Applies one tick of motion and grows the world on chunk crossings.
    fn move_character(&mut self, frame: FrameInput) -> ExplorerResult<()> {
        let moved_tile = self
            .character
            .step(&self.world, frame.x_move, frame.y_move, self.config.speed);
        if !moved_tile {
            return Ok(());
        }

        if let Some(chunk) = self.world.chunk_of(self.character.tile()) {
            if chunk != self.current_chunk {
                log::debug!("Entered chunk {:?}", chunk);
                self.current_chunk = chunk;
                self.generate_missing_neighbors(chunk)?;
            }
        }
        Ok(())
    }

    /// Uses the character's own tile, or failing that the faced tile.
    fn interact(&mut self) -> ExplorerResult<()> {
        let here = self.character.tile();
        let ahead = self.character.faced_tile();
        let Some(target) = [here, ahead]
            .into_iter()
            .find(|&pos| self.world.get(pos).allows(Capability::Interact))
        else {
            return Ok(());
        };

        match self.world.get(target) {
            TileType::Crystal => self.pick_up(target, HeldItem::Crystal),
            TileType::Stone(stone) => self.pick_up(target, HeldItem::Stone(stone)),
            TileType::Beacon { active } => self.deposit(target, active)?,
            _ => {}
        }
        Ok(())
    }

    fn pick_up(&mut self, target: Position, item: HeldItem) {
        if self.character.inventory.add(item) {
            log::debug!("Picked up {:?} at {:?}", item, target);
            self.set_tile(target, TileType::Ground);
            self.audio.play(SoundId::GetCrystal, false);
        }
    }

    fn deposit(&mut self, target: Position, active: bool) -> ExplorerResult<()> {
        let crystals = self.character.inventory.crystal_count();
        if !active && crystals > 0 {
            self.darkness.reset();
        }
        self.character.score += crystals as u32;
        self.darkness.brighten(crystals);

        if self.character.inventory.is_empty() {
            return Ok(());
        }

        let stones: Vec<PreciousStone> = self
            .character
            .inventory
            .take_all()
            .into_iter()
            .filter_map(|item| match item {
                HeldItem::Stone(stone) => Some(stone),
                HeldItem::Crystal => None,
            })
            .collect();
        if !stones.is_empty() {
            self.profile.record_stones(stones)?;
        }

        if active {
            self.audio.play(SoundId::GiveCrystal, false);
        } else {
            self.revive(target)?;
        }
        Ok(())
    }

    fn revive(&mut self, target: Position) -> ExplorerResult<()> {
        self.character.score += REVIVAL_BONUS;

        let previous = self.beacon.tile();
        if previous != target {
            self.set_tile(previous, TileType::Rock);
        }
        self.set_tile(target, TileType::Beacon { active: true });
        self.beacon.revive_at(target);
        self.audio.play(SoundId::StartBeacon, false);
        log::info!(
            "Beacon revived at {:?}, decay now {:.4} per tick",
            target,
            self.beacon.decay_rate
        );

        if let Some(chunk) = self.world.chunk_of(target) {
            self.preferred = self.draw_axis();
            self.planned_beacon = self.next_beacon_chunk(chunk);
            self.generate_missing_neighbors(chunk)?;
        }

        self.update_window();
        Ok(())
    }

    /// Picks one axis of the bias: `(bx, 0)` or `(0, by)`.
    fn draw_axis(&mut self) -> ChunkOffset {
        if self.rng.gen_bool(0.5) {
            ChunkOffset::new(self.bias.x, 0)
        } else {
            ChunkOffset::new(0, self.bias.y)
        }
    }

    /// The chunk the next beacon goes into, relative to a revived one.
    ///
    /// Missing neighbours are tried along the preferred axis, then the other
    /// axis, then the diagonal. When all three exist the search continues
    /// further along the preferred axis.
    fn next_beacon_chunk(&self, from: ChunkOffset) -> Option<ChunkOffset> {
        let other = if self.preferred.x != 0 {
            ChunkOffset::new(0, self.bias.y)
        } else {
            ChunkOffset::new(self.bias.x, 0)
        };
        let candidates = [from + self.preferred, from + other, from + self.bias];
        if let Some(&chunk) = candidates
            .iter()
            .find(|&&chunk| !self.world.contains_chunk(chunk))
        {
            return Some(chunk);
        }

        let mut chunk = from + self.preferred;
        for _ in 0..=self.world.chunks().len() {
            chunk = chunk + self.preferred;
            if !self.world.contains_chunk(chunk) {
                return Some(chunk);
            }
        }
        None
    }

    fn generate_missing_neighbors(&mut self, chunk: ChunkOffset) -> ExplorerResult<()> {
        for offset in chunk.neighbors() {
            if !self.world.contains_chunk(offset) {
                let with_beacon = self.planned_beacon == Some(offset);
                self.generate_room(offset, with_beacon)?;
            }
        }
        Ok(())
    }

    fn generate_room(&mut self, offset: ChunkOffset, with_beacon: bool) -> ExplorerResult<()> {
        let generated = RoomGenerator::new(with_beacon)
            .excluding(self.excluded_stones.clone())
            .with_collection(self.profile.collection())
            .generate(&self.config.generation, &mut self.rng)?;
        self.excluded_stones = generated.excluded_stones;
        self.world.insert(&generated.room, offset)?;

        if with_beacon {
            self.beacon_rooms.push(offset);
            if self.planned_beacon == Some(offset) {
                self.planned_beacon = None;
            }
        }
        log::debug!("Generated chunk {:?} (beacon: {})", offset, with_beacon);
        Ok(())
    }

    /// Writes a tile and shows the change if it is on screen.
    fn set_tile(&mut self, pos: Position, tile: TileType) {
        self.world.set(pos, tile);
        if self.rendered.contains(&pos) {
            self.renderer.place_tile(pos, tile);
        }
    }

    /// Sends the renderer the difference between the shown and visible tiles.
    fn update_window(&mut self) {
        let center = self.character.tile();
        let viewport = self.config.viewport;

        let leaving: Vec<Position> = self
            .rendered
            .iter()
            .copied()
            .filter(|&pos| !viewport.contains(center, pos))
            .collect();
        for pos in leaving {
            self.rendered.remove(&pos);
            self.renderer.remove_tile(pos);
        }

        for pos in viewport.positions(center) {
            let tile = self.world.get(pos);
            if tile != TileType::Blank && self.rendered.insert(pos) {
                self.renderer.place_tile(pos, tile);
            }
        }
    }

    /// Plays a cue when a crystal or an unlit beacon comes within earshot.
    fn proximity_sounds(&mut self) {
        let center = self.character.tile();
        let near_crystal = center
            .square_around(SOUND_RADIUS_CRYSTAL)
            .any(|pos| self.world.get(pos) == TileType::Crystal);
        let near_beacon = center
            .square_around(SOUND_RADIUS_BEACON)
            .any(|pos| self.world.get(pos) == TileType::Beacon { active: false });

        if near_crystal && !self.near_crystal {
            self.audio.play(SoundId::NearCrystal, false);
        }
        if near_beacon && !self.near_beacon {
            self.audio.play(SoundId::NearBeacon, false);
        }
        self.near_crystal = near_crystal;
        self.near_beacon = near_beacon;
    }
}
