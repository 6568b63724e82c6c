//! Fetching snapshots from the reporting service.
//!
//! `ReportSource` is the seam between the dashboard and the network: the
//! production implementation issues blocking HTTP requests with `reqwest`,
//! tests substitute an in-memory source. Every call is independent; there is no
//! retry and no caching.
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stock_common::api::{
    self, FINANCIAL_REPORTS, FUNDAMENTAL_ANALYSIS, GENERATE_TECHNICAL_ANALYSIS, GenerateRequest,
    STOCK_HISTORY, TECHNICAL_ANALYSIS,
};
use stock_common::tickers::Ticker;
use stock_common::{DashboardError, Result};

use crate::config::ClientConfig;
use crate::model::report::{FinancialReport, FundamentalReport, HistoryReport, TechnicalReport};

/// Read and recompute access to the reporting service.
pub trait ReportSource: Send + Sync {
    /// Latest financial report; `None` when the service has none stored yet.
    fn financial_reports(&self) -> Result<Option<FinancialReport>>;

    /// Latest fundamental analysis snapshot.
    fn fundamental_analysis(&self) -> Result<FundamentalReport>;

    /// Latest technical forecast snapshot.
    fn technical_analysis(&self) -> Result<TechnicalReport>;

    /// Latest price history snapshot.
    fn stock_history(&self) -> Result<HistoryReport>;

    /// Ask the service to recompute technical forecasts; returns its raw answer.
    fn generate_technical_analysis(&self, tickers: &[Ticker]) -> Result<Value>;
}

/// `ReportSource` backed by HTTP.
pub struct HttpReportSource {
    client: Client,
    api_base: String,
}

impl HttpReportSource {
    /// Build an HTTP client for `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::Http {
                url: config.api_base.clone(),
                reason: e.to_string(),
            })?;
        info!("Report client targets {}", config.api_base);
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        let url = api::endpoint(&self.api_base, route);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| transport_error(&url, e))?;
        decode_body(&url, response)
    }
}

impl ReportSource for HttpReportSource {
    fn financial_reports(&self) -> Result<Option<FinancialReport>> {
        self.get_json(FINANCIAL_REPORTS)
    }

    fn fundamental_analysis(&self) -> Result<FundamentalReport> {
        Ok(self.get_json::<Option<_>>(FUNDAMENTAL_ANALYSIS)?.unwrap_or_default())
    }

    fn technical_analysis(&self) -> Result<TechnicalReport> {
        Ok(self.get_json::<Option<_>>(TECHNICAL_ANALYSIS)?.unwrap_or_default())
    }

    fn stock_history(&self) -> Result<HistoryReport> {
        Ok(self.get_json::<Option<_>>(STOCK_HISTORY)?.unwrap_or_default())
    }

    fn generate_technical_analysis(&self, tickers: &[Ticker]) -> Result<Value> {
        let url = api::endpoint(&self.api_base, GENERATE_TECHNICAL_ANALYSIS);
        let body = GenerateRequest::new(tickers);
        info!("POST {} for {:?}", url, body.symbols);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| transport_error(&url, e))?;
        decode_body(&url, response)
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> DashboardError {
    DashboardError::Http {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

fn decode_body<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let text = response.text().map_err(|e| transport_error(url, e))?;
    parse_body(&text)
}

/// Decode a response body; an empty body reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    Ok(serde_json::from_str(text)?)
}
