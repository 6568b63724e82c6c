//! Stock series simulator.
//!
//! Generates a synthetic daily OHLC history ending today, optionally extends it
//! with a momentum-biased forecast, and prints the result either as a
//! chart-ready JSON document (candles, prediction, moving averages) or as a
//! plain table.
//!
//! Usage example (CLI):
//! ```bash
//! stock_sim --days 60 --start-price 180 --volatility 4 --prediction-days 10
//! stock_sim --seed 42 --format table --no-prediction
//! ```
#![warn(missing_docs)]
mod args;

use crate::args::{Args, OutputFormat};
use chrono::Utc;
use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::io::{self, Write};
use stock_common::{CandlestickChart, DashboardError, Result, StockDataPoint};
use stock_sim::{GeneratorParams, generate_prediction_data_with, generate_stock_data_with};

/// Everything printed in JSON mode.
#[derive(Serialize)]
struct DemoSeries<'a> {
    history: &'a [StockDataPoint],
    prediction: &'a [StockDataPoint],
    chart: CandlestickChart,
}

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    let params = validate(&args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let history = generate_stock_data_with(&mut rng, Utc::now(), &params);
    let prediction = match history.last() {
        Some(last) if !args.no_prediction => {
            generate_prediction_data_with(&mut rng, last, args.prediction_days, params.volatility)
        }
        _ => Vec::new(),
    };
    info!(
        "Generated {} historical and {} predicted candles",
        history.len(),
        prediction.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            let series = DemoSeries {
                history: &history,
                prediction: &prediction,
                chart: CandlestickChart::build(&history, &prediction),
            };
            serde_json::to_writer_pretty(&mut out, &series)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            write_table(&mut out, "history", &history)?;
            write_table(&mut out, "prediction", &prediction)?;
        }
    }
    Ok(())
}

/// Reject parameters the walk cannot use.
fn validate(args: &Args) -> Result<GeneratorParams> {
    for (name, value) in [
        ("start-price", args.start_price),
        ("volatility", args.volatility),
        ("trend-strength", args.trend_strength),
    ] {
        if !value.is_finite() {
            return Err(DashboardError::Config(format!("--{name} must be a finite number")));
        }
    }
    if args.volatility < 0.0 {
        return Err(DashboardError::Config("--volatility must not be negative".to_string()));
    }
    Ok(GeneratorParams {
        days: args.days,
        start_price: args.start_price,
        volatility: args.volatility,
        trend_strength: args.trend_strength,
    })
}

fn write_table<W: Write>(out: &mut W, label: &str, points: &[StockDataPoint]) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }
    writeln!(out, "# {label}")?;
    writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>5}",
        "date", "open", "high", "low", "close", "dir"
    )?;
    for p in points {
        let date = p
            .date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| p.x.to_string());
        let direction = if p.is_bullish() { "up" } else { "down" };
        writeln!(
            out,
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>5}",
            date, p.o, p.h, p.l, p.c, direction
        )?;
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["stock_sim"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_match_generator_defaults() {
        let defaults = args(&[]);
        assert_eq!(defaults.prediction_days, stock_sim::DEFAULT_PREDICTION_DAYS);
        let params = validate(&defaults).unwrap();
        assert_eq!(params, GeneratorParams::default());
    }

    #[test]
    fn rejects_negative_volatility() {
        let err = validate(&args(&["--volatility=-1"])).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn rejects_non_finite_price() {
        let err = validate(&args(&["--start-price", "NaN"])).unwrap_err();
        assert!(matches!(err, DashboardError::Config(msg) if msg.contains("start-price")));
    }

    #[test]
    fn table_lists_each_candle() {
        let points = vec![
            StockDataPoint::new(1_712_534_400_000, 10.0, 11.0, 9.0, 10.5),
            StockDataPoint::new(1_712_620_800_000, 10.5, 12.0, 10.0, 11.5),
        ];
        let mut buf = Vec::new();
        write_table(&mut buf, "history", &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# history\n"));
        assert!(text.contains("2024-04-08"));
        assert!(text.lines().nth(2).unwrap().ends_with("   up"));
        assert!(text.contains("2024-04-09"));
        assert_eq!(text.lines().count(), 4);
    }
}
