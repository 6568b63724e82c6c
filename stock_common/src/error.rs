//! Error types shared by the simulator and the report client.
//!
//! The `DashboardError` enum unifies the failure cases of the workspace: local
//! I/O, JSON decoding, HTTP transport and status failures, configuration, and
//! ticker lookups. Crates propagate this single type with `?`.
use std::io;

use thiserror::Error;

/// Unified error type shared by the simulator and the client.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport-level HTTP failure (connection refused, timeout, broken body).
    #[error("HTTP request to {url} failed: {reason}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying transport message.
        reason: String,
    },

    /// The service answered with a non-success status code.
    #[error("HTTP {status} returned by {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Numeric HTTP status.
        status: u16,
    },

    /// Invalid or missing configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while parsing the ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// A requested ticker symbol is not present in the loaded reports.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),
}
