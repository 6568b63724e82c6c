//!
//! Common types and utilities shared by the stock simulator and the report client.
//!
//! This crate aggregates:
//! - `error` — unified error type `DashboardError` used across the workspace.
//! - `result` — handy `Result<T, DashboardError>` alias.
//! - `tickers` — ticker symbols and parsing helpers shared by both sides.
//! - `ohlc` — the `StockDataPoint` candle.
//! - `chart` — candlestick chart input shaping and moving averages.
//! - `analysis` — recommendation and confidence normalisation.
//! - `api` — routes and payloads of the reporting service.
#![warn(missing_docs)]
pub mod analysis;
pub mod api;
pub mod chart;
pub mod error;
pub mod ohlc;
pub mod result;
pub mod tickers;

pub use chart::CandlestickChart;
pub use error::DashboardError;
pub use ohlc::StockDataPoint;
pub use result::Result;
