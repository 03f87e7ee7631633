#![deny(clippy::all, clippy::pedantic)]
//! # Drive
//!
//! Headless runtime for the learning car. Loads a track (or the built-in
//! oval), builds a [`rl::Driver`] from an optional JSON config plus
//! command-line overrides, and runs it for a fixed number of ticks, logging
//! progress through `tracing`.

mod app;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = app::Args::parse();
    let summary = app::run(&args)?;
    tracing::info!(
        ticks = summary.ticks,
        resets = summary.resets,
        best_run = summary.best_run,
        total_reward = summary.total_reward,
        "drive finished"
    );
    Ok(())
}
