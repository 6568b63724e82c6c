//! Routes and request payloads of the external reporting service.
//!
//! The service is reached over plain HTTP. Every route hangs off the
//! `/stocks` prefix of a configurable base URL (`API_BASE`).

use serde::{Deserialize, Serialize};

use crate::tickers::Ticker;

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Latest financial report with per-ticker fundamentals and news.
pub const FINANCIAL_REPORTS: &str = "/stocks/financial-reports";
/// Per-ticker fundamental analysis verdicts.
pub const FUNDAMENTAL_ANALYSIS: &str = "/stocks/fundamental-analysis";
/// Per-ticker technical forecasts.
pub const TECHNICAL_ANALYSIS: &str = "/stocks/technical-analysis";
/// Per-ticker historical OHLCV bars.
pub const STOCK_HISTORY: &str = "/stocks/stock-history";
/// POST target that asks the service to recompute technical forecasts.
pub const GENERATE_TECHNICAL_ANALYSIS: &str = "/stocks/technical-analysis/generate";

/// Join a base URL and a route, tolerating a trailing slash on the base.
pub fn endpoint(base: &str, route: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), route)
}

/// Body of the recompute request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Symbols to recompute.
    pub symbols: Vec<String>,
}

impl GenerateRequest {
    /// Creates a recompute request for the given tickers, preserving order.
    pub fn new(tickers: &[Ticker]) -> Self {
        GenerateRequest {
            symbols: tickers.iter().map(|t| t.to_string()).collect(),
        }
    }
}
