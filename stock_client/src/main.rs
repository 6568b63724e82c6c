//! Stock Report Client — a terminal front end for the stock analysis reporting
//! service. It fetches the latest financial report, fundamental analysis,
//! technical forecasts and price history in parallel, prints text panels for a
//! ticker, emits chart-ready JSON, and can ask the service to recompute
//! technical forecasts.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client --api-base http://192.168.0.10:8000 overview AAPL
//! stock_client chart nvda > nvda.json
//! stock_client generate AAPL TSLA --path ./tickers.txt
//! stock_client watch TSLA --interval-secs 30
//! ```
//!
//! The base URL and timeout can also come from `STOCKS_API_BASE` and
//! `STOCKS_API_TIMEOUT_SECS`, read from the environment or a `.env` file.
#![warn(missing_docs)]
mod args;
mod config;
mod dashboard;
mod fetcher;
mod model;
mod render;

use crate::args::{Args, Command};
use crate::config::ClientConfig;
use crate::dashboard::Dashboard;
use crate::fetcher::{HttpReportSource, ReportSource};
use clap::Parser;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};
use stock_common::tickers::{Ticker, TickerParser};
use stock_common::{DashboardError, Result};

/// Granularity at which the watch loop notices Ctrl+C.
const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    let config = ClientConfig::resolve(args.api_base, args.timeout_secs)?;
    let source = Arc::new(HttpReportSource::new(&config)?);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Overview { ticker } => {
            let dashboard = Dashboard::load(source);
            render::render_overview(&mut out, &dashboard, &ticker.to_string())?;
        }
        Command::Tickers => {
            let dashboard = Dashboard::load(source);
            let tickers = dashboard.stock_tickers();
            if tickers.is_empty() {
                warn!("No tickers available from {}", config.api_base);
            }
            for ticker in tickers {
                writeln!(out, "{ticker}")?;
            }
        }
        Command::Chart { ticker } => {
            let dashboard = Dashboard::load(source);
            let chart = dashboard.chart(&ticker.to_string())?;
            serde_json::to_writer_pretty(&mut out, &chart)?;
            writeln!(out)?;
        }
        Command::Generate { tickers, path } => {
            let tickers = collect_tickers(tickers, path.as_deref())?;
            let answer = source.generate_technical_analysis(&tickers)?;
            info!("Recompute requested for {} tickers", tickers.len());
            serde_json::to_writer_pretty(&mut out, &answer)?;
            writeln!(out)?;
        }
        Command::Watch {
            ticker,
            interval_secs,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            {
                let shutdown = shutdown.clone();
                ctrlc::set_handler(move || {
                    info!("Ctrl+C received. Shutting down client...");
                    shutdown.store(true, Ordering::SeqCst);
                })
                .map_err(|e| DashboardError::Format(format!("Error setting Ctrl+C handler: {e}")))?;
            }
            watch(
                &mut out,
                source,
                &ticker.to_string(),
                Duration::from_secs(interval_secs.max(1)),
                &shutdown,
            )?;
        }
    }
    Ok(())
}

/// Reload and re-render one ticker until `shutdown` is set.
fn watch<W: Write, S: ReportSource + 'static>(
    out: &mut W,
    source: Arc<S>,
    ticker: &str,
    interval: Duration,
    shutdown: &AtomicBool,
) -> Result<()> {
    writeln!(out, "Loading...")?;
    let mut dashboard = Dashboard::load(source);
    info!("Client is running. Press Ctrl+C to exit.");

    while !shutdown.load(Ordering::Relaxed) {
        render::render_overview(out, &dashboard, ticker)?;
        writeln!(out)?;
        out.flush()?;

        let deadline = Instant::now() + interval;
        while Instant::now() < deadline {
            if shutdown.load(Ordering::Relaxed) {
                info!("Watch loop stopping...");
                return Ok(());
            }
            thread::sleep(SHUTDOWN_POLL.min(interval));
        }
        dashboard.refresh();
    }
    info!("Watch loop stopping...");
    Ok(())
}

/// Merge tickers from the command line and an optional ticker file, keeping the
/// first occurrence of each. Falls back to the default selection when both are empty.
fn collect_tickers(mut tickers: Vec<Ticker>, path: Option<&str>) -> Result<Vec<Ticker>> {
    if let Some(raw) = path {
        let file_path = normalize_path(raw);
        if !is_file_exist(&file_path) {
            return Err(DashboardError::Config(format!(
                "ticker file {} does not exist",
                file_path.display()
            )));
        }
        let file = File::open(&file_path)?;
        tickers.extend(Ticker::parse_from_file(BufReader::new(file))?);
    }

    let mut unique = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        if !unique.contains(&ticker) {
            unique.push(ticker);
        }
    }
    if unique.is_empty() {
        unique.extend(Ticker::DEFAULT_SELECTION);
    }
    Ok(unique)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
