//! Command-line arguments for the simulator.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use stock_sim::DEFAULT_PREDICTION_DAYS;

/// How the generated series is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Chart-ready JSON document.
    Json,
    /// One line per candle.
    Table,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Trading days of history to generate.
    #[clap(long, default_value_t = 30)]
    pub days: usize,

    /// Price the walk starts from.
    #[clap(long, default_value_t = 200.0)]
    pub start_price: f64,

    /// Daily noise and wick size, in price units.
    #[clap(long, default_value_t = 3.0)]
    pub volatility: f64,

    /// Scale of the random kicks into the trend.
    #[clap(long, default_value_t = 0.05)]
    pub trend_strength: f64,

    /// Trading days of forecast appended after the history.
    #[clap(long, default_value_t = DEFAULT_PREDICTION_DAYS)]
    pub prediction_days: usize,

    /// Skip the forecast continuation.
    #[clap(long)]
    pub no_prediction: bool,

    /// Seed for a reproducible run.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}
