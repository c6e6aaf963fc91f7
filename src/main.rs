use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use pixel_snake::config::{
    config_path, load_config_file, log_path, ConfigError, GameConfig, DEFAULT_ENDPOINT,
};
use pixel_snake::error::GameError;
use pixel_snake::input::KeyboardCommands;
use pixel_snake::pixel::Color;
use pixel_snake::session::{play, Summary};
use pixel_snake::sink::{Endpoint, EndpointError, HttpSink, RenderSink, TerminalSink};
use pixel_snake::terminal_runtime::{restore_terminal, RawModeGuard, TerminalSession};
use pixel_snake::world::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum SinkKind {
    /// Draw the board in this terminal.
    Terminal,
    /// POST every frame to a pixel display server.
    Http,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Where frames are drawn.
    #[arg(long, value_enum, default_value_t = SinkKind::Terminal)]
    sink: SinkKind,

    /// Display server URL for `--sink http`.
    #[arg(long)]
    endpoint: Option<String>,

    /// JSON config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    height: Option<u16>,

    /// Background color as #rrggbb.
    #[arg(long)]
    background: Option<Color>,

    #[arg(long = "apple-color")]
    apple_color: Option<Color>,

    #[arg(long = "snake-color")]
    snake_color: Option<Color>,

    /// Seed apple placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (defaults to the platform data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(log_path);
    if let Err(e) = init_logging(&log_file, cli.log_level) {
        eprintln!("Failed to open log file {}: {e}", log_file.display());
    }

    install_panic_hook();

    match run(cli) {
        Ok(summary) => {
            println!("{}", summary.outcome.message());
            println!("Length: {} after {} moves", summary.length, summary.steps);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("pixel-snake: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Summary, AppError> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let file = load_config_file(&path)?;
    let config = apply_cli(GameConfig::default().with_file(&file), &cli);
    config.validate()?;
    info!("config: {config:?}");

    let world = World::new(config);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.sink {
        SinkKind::Terminal => {
            let session = TerminalSession::enter()?;
            let mut sink = TerminalSink::new(session, config.size);
            play_with(&world, &mut sink, &mut rng)
        }
        SinkKind::Http => {
            let raw = cli
                .endpoint
                .as_deref()
                .or(file.endpoint.as_deref())
                .unwrap_or(DEFAULT_ENDPOINT);
            let endpoint: Endpoint = raw.parse()?;
            info!("posting frames to {endpoint}");
            println!("Use the arrow keys to move the snake, q to quit.");

            let _raw_mode = RawModeGuard::enable()?;
            let mut sink = HttpSink::spawn(endpoint);
            play_with(&world, &mut sink, &mut rng)
        }
    }
}

fn play_with<S: RenderSink>(
    world: &World,
    sink: &mut S,
    rng: &mut StdRng,
) -> Result<Summary, AppError> {
    Ok(play(world, KeyboardCommands::new(), sink, rng)?)
}

fn apply_cli(config: GameConfig, cli: &Cli) -> GameConfig {
    let mut size = config.size;
    size.width = cli.width.unwrap_or(size.width);
    size.height = cli.height.unwrap_or(size.height);

    GameConfig {
        size,
        background: cli.background.unwrap_or(config.background),
        apple: cli.apple_color.unwrap_or(config.apple),
        snake: cli.snake_color.unwrap_or(config.snake),
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(level, Config::default(), File::create(path)?)
        .map_err(|e| io::Error::other(e.to_string()))
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
