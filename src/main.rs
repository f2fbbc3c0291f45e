use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use trig_snake::game::GameConfig;
use trig_snake::modes::{PlayMode, SimulateConfig, SimulateMode};

#[derive(Parser)]
#[command(name = "trig-snake")]
#[command(version, about = "Snake game for practicing unit circle trigonometry")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Grid width in cells (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for question and food generation (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per snake step
    #[arg(long)]
    tick_ms: Option<u64>,

    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ticks to run in simulate mode
    #[arg(long, default_value = "2000")]
    steps: usize,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in the terminal with keyboard and mouse
    Play,
    /// Let the autopilot play headless and print a summary
    Simulate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config, seed);
            play_mode.run().await?;
        }
        Mode::Simulate => {
            let mut simulate_mode = SimulateMode::new(SimulateConfig::new(cli.steps, seed, config));
            simulate_mode.run()?;
        }
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.play_tick_ms = tick_ms;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

/// Logs go to a file only; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
