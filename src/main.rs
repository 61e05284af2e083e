//! Grid Arcade runner (default binary).
//!
//! Runs one built-in script on the engine: full-screen in the terminal by
//! default, or without any output surface with `--headless`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_arcade::engine::input::{CrosstermSource, EventSource, ScriptedSource};
use grid_arcade::engine::{Engine, EngineConfig, NullPresenter, Presenter, TerminalPresenter};
use grid_arcade::script::{script_for, GameScript};
use grid_arcade::types::{GameMode, AUTO_DROP_MS, DEFAULT_FRAMES, DEFAULT_FRAME_MS};

/// Environment variable holding the log filter
const LOG_ENV: &str = "GRID_ARCADE_LOG";

/// Frames between progress log lines
const PROGRESS_EVERY: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Game {
    Tetris,
    Snake,
}

impl From<Game> for GameMode {
    fn from(game: Game) -> Self {
        match game {
            Game::Tetris => GameMode::Tetris,
            Game::Snake => GameMode::Snake,
        }
    }
}

/// Tetris and Snake on one shared grid engine.
#[derive(Debug, Parser)]
#[command(name = "grid-arcade", version)]
struct Args {
    /// Which built-in game script to run.
    #[arg(short, long, value_enum, default_value = "tetris")]
    game: Game,

    /// Stop after this many frames (zero or negative: the default).
    #[arg(long, default_value_t = DEFAULT_FRAMES as i64, value_name = "N", allow_negative_numbers = true)]
    frames: i64,

    /// Delay between frames.
    #[arg(long, default_value_t = DEFAULT_FRAME_MS as i64, value_name = "MS", allow_negative_numbers = true)]
    ms_per_frame: i64,

    /// Seed for piece selection and food placement (default: from the clock).
    #[arg(long)]
    seed: Option<u32>,

    /// Run without a terminal surface or keyboard input.
    #[arg(long)]
    headless: bool,

    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn frames(&self) -> u32 {
        if self.frames <= 0 {
            return DEFAULT_FRAMES;
        }
        u32::try_from(self.frames).unwrap_or(u32::MAX)
    }

    fn frame_delay(&self) -> Duration {
        let ms = u64::try_from(self.ms_per_frame)
            .ok()
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);
        Duration::from_millis(ms)
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = EngineConfig {
        seed: args.seed(),
        auto_drop_ms: AUTO_DROP_MS,
    };
    let mut script = script_for(args.game.into());
    info!(
        game = script.name(),
        frames = args.frames(),
        ms_per_frame = args.frame_delay().as_millis() as u64,
        seed = config.seed,
        headless = args.headless,
        "starting"
    );

    if args.headless {
        let engine = Engine::init(config, ScriptedSource::new(), NullPresenter::new())?;
        run(engine, script.as_mut(), &args)
    } else {
        let engine = Engine::init(config, CrosstermSource::new(), TerminalPresenter::new())
            .context("terminal setup failed")?;
        run(engine, script.as_mut(), &args)
    }
}

/// Install the subscriber. In terminal mode without a log file nothing is
/// installed, since log lines would tear the alternate screen.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn run<E: EventSource, P: Presenter>(
    mut engine: Engine<E, P>,
    script: &mut dyn GameScript,
    args: &Args,
) -> Result<()> {
    let frames = args.frames();
    let delay = args.frame_delay();

    script.init(&mut engine);

    let mut frame = 0;
    while frame < frames && engine.poll_events() && !engine.is_game_ended() {
        script.update(&mut engine);
        engine.present_frame()?;
        thread::sleep(delay);
        frame += 1;

        if frame % PROGRESS_EVERY == 0 {
            info!(frame, score = engine.score(), "progress");
        }
    }

    // Show the final state (game over overlay) once more.
    engine.present_frame()?;
    info!(
        frames = frame,
        score = engine.score(),
        ended = engine.is_game_ended(),
        reason = engine.world().end_reason().unwrap_or("-"),
        "main loop finished"
    );

    if !engine.is_game_ended() {
        script.end(&mut engine);
    }

    engine.shutdown()?;
    Ok(())
}
