//! OHLC sample point shared by the generator, the chart shaping and the client.
//!
//! A `StockDataPoint` is the input unit of a candlestick chart: a millisecond
//! UTC timestamp plus open/high/low/close prices. Field names are the short
//! `x/o/h/l/c` keys candlestick chart inputs expect.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lowest price any emitted point may carry.
pub const PRICE_FLOOR: f64 = 0.01;

/// One daily candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockDataPoint {
    /// UTC timestamp in milliseconds since Unix epoch.
    pub x: i64,
    /// Open price.
    pub o: f64,
    /// High price.
    pub h: f64,
    /// Low price.
    pub l: f64,
    /// Close price.
    pub c: f64,
}

impl StockDataPoint {
    /// Build a point from a timestamp and raw prices, rounding each price to cents.
    pub fn new(x: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            x,
            o: round2(open),
            h: round2(high),
            l: round2(low),
            c: round2(close),
        }
    }

    /// `low <= min(open, close) <= max(open, close) <= high`, every price above zero.
    pub fn is_consistent(&self) -> bool {
        self.l > 0.0
            && self.l <= self.o.min(self.c)
            && self.o.max(self.c) <= self.h
    }

    /// UTC calendar day of the candle, `None` for timestamps chrono cannot represent.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(self.x).map(|dt| dt.date_naive())
    }

    /// Closed at or above the open.
    pub fn is_bullish(&self) -> bool {
        self.c >= self.o
    }
}

/// Round to two decimals, the precision every emitted price carries.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
