//! # Drive Loop
//!
//! Argument parsing and the tick loop behind the `drive` binary. The car,
//! its sensors and its policy all live on this thread; each tick senses,
//! decides, moves and trains before the next one starts.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rl::{CarTrackEnv, DriveStats, Driver, DriverConfig, TargetStrategy};
use track::Track;

/// Command-line arguments for the `drive` binary.
#[derive(Parser, Debug)]
#[command(name = "drive", about = "Train a ray-sensing car online on a track")]
pub struct Args {
    /// Track JSON to drive on. Defaults to the built-in oval.
    #[arg(long)]
    pub track: Option<PathBuf>,

    /// Driver configuration JSON; missing fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 1000)]
    pub ticks: u64,

    /// Overrides the configured seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Overrides the configured training target strategy.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Writes the track in use to this path before driving.
    #[arg(long)]
    pub save_track: Option<PathBuf>,

    /// Log a progress line every this many ticks (0 disables).
    #[arg(long, default_value_t = 100)]
    pub log_every: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Nudge,
    SoftUniform,
    OneHot,
}

impl From<StrategyArg> for TargetStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Nudge => TargetStrategy::Nudge,
            StrategyArg::SoftUniform => TargetStrategy::SoftUniform { base: None },
            StrategyArg::OneHot => TargetStrategy::ONE_HOT,
        }
    }
}

fn load_config(args: &Args) -> Result<DriverConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading driver config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing driver config {}", path.display()))?
        }
        None => DriverConfig::default(),
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut DriverConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
}

fn load_track(args: &Args) -> Result<Track> {
    let track = match &args.track {
        Some(path) => {
            Track::load(path).with_context(|| format!("loading track {}", path.display()))?
        }
        None => {
            tracing::info!("no track given; using the built-in oval");
            Track::builtin_oval()
        }
    };
    if let Some(path) = &args.save_track {
        track.save(path).with_context(|| format!("saving track {}", path.display()))?;
    }
    Ok(track)
}

/// Runs `args.ticks` ticks and returns the final statistics.
///
/// # Errors
///
/// Returns an error when the config or track cannot be read, or when the
/// configured driver is invalid.
pub fn run(args: &Args) -> Result<DriveStats> {
    let config = load_config(args)?;
    let track = load_track(args)?;

    let mut driver = Driver::from_config(&config).context("building driver")?;
    let car = config.car.build().context("building car")?;
    let mut env = CarTrackEnv::new(car, config.action_space(), track.segments());
    driver.check_world(&env)?;

    tracing::info!(
        ticks = args.ticks,
        sides = track.len(),
        seed = config.seed,
        strategy = ?config.strategy,
        "starting drive"
    );
    for _ in 0..args.ticks {
        let report = driver.tick(&mut env);
        let done = report.tick + 1;
        if args.log_every > 0 && done % args.log_every == 0 {
            let stats = driver.stats();
            tracing::info!(
                tick = done,
                resets = stats.resets,
                run = stats.ticks_since_reset,
                best_run = stats.best_run,
                skipped_updates = driver.trainer().failures(),
                "progress"
            );
        }
    }
    Ok(driver.stats())
}
