//! Command-line arguments for the report client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use stock_common::tickers::Ticker;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the reporting service (overrides `STOCKS_API_BASE`).
    #[clap(long, global = true)]
    pub api_base: Option<String>,

    /// Per-request timeout in seconds (overrides `STOCKS_API_TIMEOUT_SECS`).
    #[clap(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Client actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Technical, fundamental and news panels for one ticker.
    Overview {
        /// Ticker to show.
        #[clap(value_enum, ignore_case = true)]
        ticker: Ticker,
    },

    /// Tickers covered by the latest reports.
    Tickers,

    /// History and forecast of one ticker as chart-ready JSON.
    Chart {
        /// Ticker to shape.
        #[clap(value_enum, ignore_case = true)]
        ticker: Ticker,
    },

    /// Ask the service to recompute technical forecasts.
    Generate {
        /// Tickers to recompute; defaults to the standard selection.
        #[clap(value_enum, ignore_case = true)]
        tickers: Vec<Ticker>,

        /// Text file with more tickers, separated by commas, spaces, or new lines.
        #[clap(long)]
        path: Option<String>,
    },

    /// Re-render the overview of one ticker on an interval until Ctrl+C.
    Watch {
        /// Ticker to show.
        #[clap(value_enum, ignore_case = true)]
        ticker: Ticker,

        /// Seconds between refreshes.
        #[clap(long, default_value_t = 60)]
        interval_secs: u64,
    },
}
