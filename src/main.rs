use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hamilton_snake::cycle::CycleStrategy;
use hamilton_snake::game::GameConfig;
use hamilton_snake::modes::{headless, search, HeadlessMode, PlayMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hamilton_snake")]
#[command(version, about = "Snake that fills the board by following a Hamiltonian cycle")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value = "auto")]
    mode: Mode,

    /// Grid rows, walls included
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns, walls included
    #[arg(long)]
    cols: Option<usize>,

    /// TOML game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// How the covering cycle is built
    #[arg(long, value_enum)]
    strategy: Option<CycleStrategy>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write a grid snapshot after every move to this file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Stop a headless game after this many moves
    #[arg(long)]
    max_steps: Option<u32>,

    /// Print headless and search results as JSON
    #[arg(long)]
    json: bool,

    /// Run the longest-path search in the search demo
    #[arg(long)]
    longest: bool,

    /// Write logs to this file (the terminal modes log nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Watch the autopilot play in the terminal
    Auto,
    /// Steer with the keyboard; press I to hand over to the autopilot
    Manual,
    /// Play one autopilot game without a terminal and print a summary
    Headless,
    /// Path search on the walled 20x20 demo board
    Search,
}

impl Mode {
    fn uses_terminal(self) -> bool {
        matches!(self, Mode::Auto | Mode::Manual)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.mode, cli.log_file.as_ref())?;

    match cli.mode {
        Mode::Search => {
            let report = search::run_demo(cli.longest)?;
            search::print_report(&report, cli.json)?;
        }
        Mode::Headless => {
            let config = build_config(&cli)?;
            let summary = HeadlessMode::new(config, cli.max_steps)?.run()?;
            headless::print_summary(&summary, cli.json)?;
        }
        Mode::Auto | Mode::Manual => {
            let config = build_config(&cli)?;
            let mut play_mode = PlayMode::new(config)?;
            play_mode.run().await?;
        }
    }

    Ok(())
}

fn init_tracing(mode: Mode, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hamilton_snake=info"))
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        // The terminal belongs to the renderer
        None if mode.uses_terminal() => {}
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(rows) = cli.rows {
        config.grid_rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.grid_cols = cols;
    }
    if let Some(strategy) = cli.strategy {
        config.cycle_strategy = strategy;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.record.is_some() {
        config.record_movements = cli.record.clone();
    }
    match cli.mode {
        Mode::Manual => config.autopilot = false,
        Mode::Auto => config.autopilot = true,
        Mode::Headless | Mode::Search => {}
    }

    config.validate()?;
    Ok(config)
}
