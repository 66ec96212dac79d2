//! # World Explorer Main Entry Point
//!
//! Parses the command line, sets up logging and the player profile, then
//! either opens the game window or runs one of the headless tools.

use clap::{Parser, Subcommand};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use world_explorer::{
    ExplorationSession, ExplorerError, ExplorerResult, FixedTimestep, Generator, InputAction,
    InputState, JsonFileStore, LogAudio, MacroquadDisplay, ProfileManager, RecordingRenderer,
    RoomGenerator, SessionConfig, SessionPhase,
};
#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for World Explorer.
#[derive(Parser, Debug)]
#[command(name = "world_explorer")]
#[command(about = "Dig through the dark and keep the beacons burning")]
#[command(version)]
struct Args {
    /// Random seed for world generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Where the player profile is stored
    #[arg(long, default_value = "profile.json")]
    profile: PathBuf,

    /// Session settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Open the game window (default)
    Play,
    /// Print generated rooms in map text format
    Generate {
        /// Place a beacon in every room
        #[arg(long)]
        beacon: bool,
        /// Number of rooms to print
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Run a session without a window and report how it went
    Simulate {
        /// Ticks to run after the world is built
        #[arg(long, default_value_t = 900)]
        ticks: u32,
    },
}

fn main() -> ExplorerResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level)?;

    info!("Starting World Explorer v{}", world_explorer::VERSION);

    let config = load_config(&args)?;
    match args.command.clone().unwrap_or(Command::Play) {
        Command::Play => run_window(config, &args.profile),
        Command::Generate { beacon, count } => generate_rooms(&config, beacon, count),
        Command::Simulate { ticks } => simulate(config, &args.profile, ticks),
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> ExplorerResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| ExplorerError::InvalidState(format!("logging setup failed: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .try_init()
            .map_err(|e| ExplorerError::InvalidState(format!("logging setup failed: {}", e)))?;
    }

    Ok(())
}

/// Builds the session configuration from the optional file and the seed flag.
fn load_config(args: &Args) -> ExplorerResult<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Reading session config from {}", path.display());
            SessionConfig::from_json_file(path)?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    Ok(config)
}

fn open_profile(path: &Path) -> ExplorerResult<ProfileManager> {
    let store = JsonFileStore::new(path);
    let profile = ProfileManager::load(Box::new(store))?;
    info!(
        "Profile {} loaded: high score {}, {} stones collected",
        path.display(),
        profile.high_score(),
        profile.collection().collected_count()
    );
    Ok(profile)
}

/// Opens the macroquad window and plays until the session ends or the window closes.
fn run_window(config: SessionConfig, profile_path: &Path) -> ExplorerResult<()> {
    let profile = open_profile(profile_path)?;
    let window = Conf {
        window_title: "World Explorer".to_string(),
        window_width: 800,
        window_height: 600,
        ..Default::default()
    };

    macroquad::Window::from_config(window, async move {
        if let Err(e) = run_game(config, profile).await {
            error!("Game stopped: {}", e);
        }
    });
    Ok(())
}

/// Main game loop: fixed-rate ticks, one present per frame.
async fn run_game(config: SessionConfig, mut profile: ProfileManager) -> ExplorerResult<()> {
    let mut clock = FixedTimestep::new(config.tick_rate);
    let mut input = InputState::new();
    let mut session =
        ExplorationSession::new(config, &mut profile, MacroquadDisplay::new(), LogAudio::new());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("Escape pressed, leaving");
            session.teardown();
            break;
        }

        input.set_pressed(get_keys_down().into_iter().map(key_name));
        for key in get_keys_released() {
            input.release(key_name(key));
        }

        for _ in 0..clock.advance(get_frame_time()) {
            session.tick(&mut input)?;
        }
        if session.is_terminated() {
            break;
        }

        let banner = match session.phase() {
            SessionPhase::GameOverPending { .. } => Some("GAME OVER"),
            SessionPhase::Tutorial => Some("Watch closely..."),
            _ => None,
        };
        session.renderer().present(banner);
        next_frame().await;
    }

    if let Some(score) = session.final_score() {
        info!("Final score {}", score);
    }
    Ok(())
}

/// Key identifier matching the names stored in key bindings.
fn key_name(key: KeyCode) -> String {
    format!("{:?}", key).to_lowercase()
}

fn generate_rooms(config: &SessionConfig, with_beacon: bool, count: usize) -> ExplorerResult<()> {
    let generator = RoomGenerator::new(with_beacon);
    let mut rng = world_explorer::generation::utils::create_rng(&config.generation);
    let mut excluded = world_explorer::StoneSet::new();

    info!(
        "Generating {} room(s) with {} (seed {})",
        count,
        generator.generator_type(),
        config.seed()
    );
    for index in 0..count {
        let generated = RoomGenerator::new(with_beacon)
            .excluding(excluded)
            .generate(&config.generation, &mut rng)?;
        excluded = generated.excluded_stones;
        if index > 0 {
            println!();
        }
        print!("{}", generated.room.to_map_text());
    }
    Ok(())
}

/// Plays the tutorial, then wanders in random directions for `ticks` ticks.
fn simulate(mut config: SessionConfig, profile_path: &Path, ticks: u32) -> ExplorerResult<()> {
    config.water_drop_probability = 0.0;
    let mut wander = StdRng::seed_from_u64(config.seed().wrapping_add(1));
    let mut profile = open_profile(profile_path)?;
    let keys = profile.keys().clone();
    let mut session =
        ExplorationSession::new(config, &mut profile, RecordingRenderer::new(), LogAudio::new());
    let mut input = InputState::new();

    while matches!(
        session.phase(),
        SessionPhase::Initializing | SessionPhase::Tutorial
    ) {
        session.tick(&mut input)?;
    }

    let directions = [
        InputAction::Top,
        InputAction::Bottom,
        InputAction::Left,
        InputAction::Right,
    ];
    for tick in 0..ticks {
        if session.is_terminated() {
            break;
        }
        if tick % 15 == 0 {
            let action = directions[wander.gen_range(0..directions.len())];
            input.set_pressed([keys.key_for(action).to_string()]);
            input.release(keys.key_for(InputAction::Interact));
        }
        session.tick(&mut input)?;
    }

    let character = session.character();
    println!("phase:        {:?}", session.phase());
    println!("ticks:        {}", session.frame());
    println!("score:        {}", character.score);
    println!("position:     ({:.2}, {:.2})", character.position.x, character.position.y);
    println!("chunks:       {}", session.world().chunks().len());
    println!("beacon rooms: {:?}", session.beacon_rooms());
    println!("light radius: {:.1}", session.darkness().radius);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_match_default_bindings() {
        let keys = world_explorer::KeyBindings::default();
        assert_eq!(key_name(KeyCode::W), keys.key_for(InputAction::Top));
        assert_eq!(key_name(KeyCode::Space), keys.key_for(InputAction::Interact));
    }

    #[test]
    fn test_simulate_runs_headless() -> ExplorerResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("profile.json");
        simulate(SessionConfig::for_testing(3), &path, 120)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_generate_rooms_prints() -> ExplorerResult<()> {
        generate_rooms(&SessionConfig::for_testing(4), true, 2)
    }
}
