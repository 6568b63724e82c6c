//! Synthetic OHLC series used by demos and tests of the stock dashboard.
//!
//! The library half of `stock_sim`: the binary wraps it in a small CLI that
//! prints a generated series shaped for a candlestick chart.
#![warn(missing_docs)]
pub mod model;

pub use model::generator::{
    DEFAULT_PREDICTION_DAYS, GeneratorParams, generate_prediction_data,
    generate_prediction_data_with, generate_stock_data, generate_stock_data_with,
};
