use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, TickSpeed};
use grid_snake::modes::HumanMode;
use grid_snake::persistence::{DEFAULT_HIGH_SCORE_FILE, FileHighScore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width in cells (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,

    /// Grid height in cells (overrides the config file)
    #[arg(long)]
    rows: Option<usize>,

    /// Milliseconds between moves, 40 (fast) to 250 (slow)
    #[arg(long, default_value_t = TickSpeed::DEFAULT_MS,
          value_parser = clap::value_parser!(u64).range(40..=250))]
    speed: u64,

    /// Where the high score is kept
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity when --log-file is set
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn init_logging(path: &Path, level: LogLevel) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::from(level))
        .init();
    Ok(())
}

fn game_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = game_config(&cli)?;
    tracing::info!(cols = config.cols, rows = config.rows, "configuration loaded");

    let store = FileHighScore::new(cli.high_score_file.clone());
    let mut human_mode = HumanMode::new(config, TickSpeed::new(cli.speed), store);
    human_mode.run().await?;

    Ok(())
}
