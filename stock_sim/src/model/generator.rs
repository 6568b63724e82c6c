//! Synthetic daily OHLC series for demos and tests.
//!
//! Two generators share one candle model:
//!
//! - [`generate_stock_data`] walks backward from today over trading days, carrying a
//!   mean-reverting trend term (`trend = trend * 0.95 + noise * trend_strength`) that
//!   pushes each close away from its open, and returns the candles oldest first.
//! - [`generate_prediction_data`] continues a series forward from a seed candle,
//!   using the seed's own open-to-close momentum plus a slight upward bias.
//!
//! Every candle derives open from the previous close plus bounded noise, close from
//! open plus the daily change, and high/low from random offsets around the body.
//! Prices are clamped to [`PRICE_FLOOR`] and rounded to cents, so every point
//! satisfies `low <= min(open, close) <= max(open, close) <= high`.
//!
//! Generation is seedless by default; the `*_with` variants take an explicit
//! random source and anchor time so callers can reproduce a run.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::warn;
use rand::Rng;

use crate::model::calendar::{previous_trading_days, trading_days_after};
use stock_common::ohlc::{PRICE_FLOOR, StockDataPoint};

/// Decay applied to the trend term each trading day.
const TREND_DECAY: f64 = 0.95;
/// Centre of the daily-change noise for predictions; below 0.5 biases upward.
const PREDICTION_NOISE_CENTER: f64 = 0.45;

/// Shape of a historical series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParams {
    /// Number of trading days to emit.
    pub days: usize,
    /// Price the walk starts from (the most recent close), at least 1.
    pub start_price: f64,
    /// Absolute size of the daily noise and of the wicks.
    pub volatility: f64,
    /// Scale of the random kicks fed into the trend term.
    pub trend_strength: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            days: 30,
            start_price: 200.0,
            volatility: 3.0,
            trend_strength: 0.05,
        }
    }
}

/// Default length of a prediction continuation, in trading days.
pub const DEFAULT_PREDICTION_DAYS: usize = 7;

/// Generate `days` trading days of history ending today.
pub fn generate_stock_data(
    days: usize,
    start_price: f64,
    volatility: f64,
    trend_strength: f64,
) -> Vec<StockDataPoint> {
    let params = GeneratorParams {
        days,
        start_price,
        volatility,
        trend_strength,
    };
    generate_stock_data_with(&mut rand::rng(), Utc::now(), &params)
}

/// Generate history ending at `end` with an explicit random source.
///
/// Weekend days are skipped, so the last point falls on `end` when it is a weekday
/// and on the preceding Friday otherwise. Each point keeps `end`'s time of day.
pub fn generate_stock_data_with<R: Rng + ?Sized>(
    rng: &mut R,
    end: DateTime<Utc>,
    params: &GeneratorParams,
) -> Vec<StockDataPoint> {
    let volatility = params.volatility.max(0.0);
    let time_of_day = end.time();
    let mut current_price = params.start_price.max(1.0);
    let mut trend = 0.0;

    let mut result: Vec<StockDataPoint> = previous_trading_days(end.date_naive(), params.days)
        .into_iter()
        .rev()
        .map(|day| {
            trend = trend * TREND_DECAY + noise(rng) * params.trend_strength;
            let daily_change = trend * current_price + noise(rng) * volatility;
            let open = current_price + noise(rng) * (volatility / 2.0);
            let (point, close) = candle(rng, timestamp(day, time_of_day), open, daily_change, volatility);
            current_price = close;
            point
        })
        .collect();

    result.reverse();
    result
}

/// Continue a series for `days` trading days after `last_point`.
pub fn generate_prediction_data(
    last_point: &StockDataPoint,
    days: usize,
    volatility: f64,
) -> Vec<StockDataPoint> {
    generate_prediction_data_with(&mut rand::rng(), last_point, days, volatility)
}

/// Prediction with an explicit random source.
///
/// Points sit at midnight UTC, starting with the first trading day after the seed's
/// date. A seed with a non-positive open contributes no momentum.
pub fn generate_prediction_data_with<R: Rng + ?Sized>(
    rng: &mut R,
    last_point: &StockDataPoint,
    days: usize,
    volatility: f64,
) -> Vec<StockDataPoint> {
    let Some(seed_date) = last_point.date() else {
        warn!("Seed timestamp {} is out of range; no prediction generated", last_point.x);
        return Vec::new();
    };

    let volatility = volatility.max(0.0);
    let momentum = if last_point.o > 0.0 {
        (last_point.c - last_point.o) / last_point.o
    } else {
        0.0
    };
    let mut current_price = last_point.c;

    trading_days_after(seed_date, days)
        .into_iter()
        .map(|day| {
            let daily_change =
                momentum * current_price + (rng.random::<f64>() - PREDICTION_NOISE_CENTER) * volatility;
            let open = current_price + noise(rng) * (volatility / 3.0);
            let (point, close) = candle(rng, timestamp(day, NaiveTime::MIN), open, daily_change, volatility);
            current_price = close;
            point
        })
        .collect()
}

/// Uniform noise in `[-0.5, 0.5)`.
fn noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>() - 0.5
}

/// Build one candle around `open`; returns the point and the unrounded close.
fn candle<R: Rng + ?Sized>(
    rng: &mut R,
    x: i64,
    open: f64,
    daily_change: f64,
    volatility: f64,
) -> (StockDataPoint, f64) {
    let open = open.max(PRICE_FLOOR);
    let close = (open + daily_change).max(PRICE_FLOOR);
    let high = open.max(close) + rng.random::<f64>() * volatility;
    let low = (open.min(close) - rng.random::<f64>() * volatility).max(PRICE_FLOOR);
    (StockDataPoint::new(x, open, high, low, close), close)
}

fn timestamp(day: NaiveDate, time: NaiveTime) -> i64 {
    day.and_time(time).and_utc().timestamp_millis()
}
