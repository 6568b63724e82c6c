//! Dashboard state loaded from the reporting service.
//!
//! `Dashboard::load` fans the four snapshot requests out to worker threads and
//! collects their results over a `crossbeam_channel`. Each panel settles on its
//! own: a failed request marks only that panel as failed with a generic message,
//! and the typed error goes to the log. Accessors read across the loaded panels
//! for a single ticker.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use log::{error, info};
use stock_common::{CandlestickChart, DashboardError, Result, StockDataPoint};

use crate::fetcher::ReportSource;
use crate::model::report::{
    FinancialReport, FundamentalAnalysis, FundamentalReport, HistoryBar, HistoryReport, NewsItem,
    StockReport, TechnicalForecast, TechnicalReport, history_points,
};

/// Message shown when the financial report cannot be fetched.
pub const FINANCIAL_REPORT_FAILED: &str = "Failed to fetch financial report";
/// Message shown when the fundamental analysis cannot be fetched.
pub const FUNDAMENTAL_FAILED: &str = "Failed to fetch fundamental analysis";
/// Message shown when the technical analysis cannot be fetched.
pub const TECHNICAL_FAILED: &str = "Failed to fetch technical analysis";
/// Message shown when the price history cannot be fetched.
pub const HISTORY_FAILED: &str = "Failed to fetch stock history";

/// Outcome of one panel's request.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    /// Data arrived and decoded.
    Loaded(T),
    /// The request failed; holds the user-facing message.
    Failed(String),
}

impl<T> Panel<T> {
    /// Loaded data, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Panel::Loaded(value) => Some(value),
            Panel::Failed(_) => None,
        }
    }

    /// User-facing failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Panel::Loaded(_) => None,
            Panel::Failed(message) => Some(message),
        }
    }

    fn settle(result: Result<T>, message: &str) -> Self {
        match result {
            Ok(value) => Panel::Loaded(value),
            Err(e) => {
                error!("{}: {}", message, e);
                Panel::Failed(message.to_string())
            }
        }
    }
}

/// Result of one worker, tagged by endpoint.
enum Fetched {
    Financial(Result<Option<FinancialReport>>),
    Fundamental(Result<FundamentalReport>),
    Technical(Result<TechnicalReport>),
    History(Result<HistoryReport>),
}

/// Every panel of the dashboard for all tickers.
pub struct Dashboard<S: ReportSource + 'static> {
    source: Arc<S>,
    /// Financial report with fundamentals and news; `None` when nothing is stored.
    pub report: Panel<Option<FinancialReport>>,
    /// Fundamental verdicts.
    pub fundamentals: Panel<FundamentalReport>,
    /// Technical forecasts.
    pub technical: Panel<TechnicalReport>,
    /// Price history.
    pub history: Panel<HistoryReport>,
}

impl<S: ReportSource + 'static> Dashboard<S> {
    /// Fetch every panel from `source` in parallel.
    pub fn load(source: Arc<S>) -> Self {
        let mut dashboard = Dashboard {
            source,
            report: Panel::Failed(FINANCIAL_REPORT_FAILED.to_string()),
            fundamentals: Panel::Failed(FUNDAMENTAL_FAILED.to_string()),
            technical: Panel::Failed(TECHNICAL_FAILED.to_string()),
            history: Panel::Failed(HISTORY_FAILED.to_string()),
        };
        dashboard.refresh();
        dashboard
    }

    /// Re-fetch every panel. Panels whose worker dies keep a failed state.
    pub fn refresh(&mut self) {
        let (tx, rx) = unbounded::<Fetched>();

        let jobs: [fn(&S) -> Fetched; 4] = [
            |s: &S| Fetched::Financial(s.financial_reports()),
            |s: &S| Fetched::Fundamental(s.fundamental_analysis()),
            |s: &S| Fetched::Technical(s.technical_analysis()),
            |s: &S| Fetched::History(s.stock_history()),
        ];
        for job in jobs {
            let source = Arc::clone(&self.source);
            let tx = tx.clone();
            thread::spawn(move || {
                // The receiver only goes away if the dashboard was dropped mid-refresh.
                let _ = tx.send(job(&source));
            });
        }
        drop(tx);

        self.report = Panel::Failed(FINANCIAL_REPORT_FAILED.to_string());
        self.fundamentals = Panel::Failed(FUNDAMENTAL_FAILED.to_string());
        self.technical = Panel::Failed(TECHNICAL_FAILED.to_string());
        self.history = Panel::Failed(HISTORY_FAILED.to_string());

        for fetched in rx.iter() {
            match fetched {
                Fetched::Financial(r) => self.report = Panel::settle(r, FINANCIAL_REPORT_FAILED),
                Fetched::Fundamental(r) => self.fundamentals = Panel::settle(r, FUNDAMENTAL_FAILED),
                Fetched::Technical(r) => self.technical = Panel::settle(r, TECHNICAL_FAILED),
                Fetched::History(r) => self.history = Panel::settle(r, HISTORY_FAILED),
            }
        }
        info!(
            "Dashboard refreshed: {} tickers, {} failed panels",
            self.stock_tickers().len(),
            self.failed_panels()
        );
    }

    /// Number of panels currently failed.
    pub fn failed_panels(&self) -> usize {
        [
            self.report.error(),
            self.fundamentals.error(),
            self.technical.error(),
            self.history.error(),
        ]
        .iter()
        .filter(|e| e.is_some())
        .count()
    }

    /// The financial report, when one was loaded.
    pub fn financial_report(&self) -> Option<&FinancialReport> {
        self.report.loaded().and_then(Option::as_ref)
    }

    /// Tickers of the financial report, or of any other loaded panel when the
    /// report is missing or lists no stocks. Sorted, without duplicates.
    pub fn stock_tickers(&self) -> Vec<String> {
        if let Some(report) = self.financial_report().filter(|r| !r.stocks.is_empty()) {
            return report.tickers();
        }
        let mut tickers = BTreeSet::new();
        if let Some(f) = self.fundamentals.loaded() {
            tickers.extend(f.tickers());
        }
        if let Some(t) = self.technical.loaded() {
            tickers.extend(t.tickers());
        }
        if let Some(h) = self.history.loaded() {
            tickers.extend(h.tickers());
        }
        tickers.into_iter().collect()
    }

    /// Fundamentals and news for `ticker`.
    pub fn stock_data(&self, ticker: &str) -> Option<&StockReport> {
        self.financial_report()?.get(ticker)
    }

    /// News articles for `ticker`; empty when none were loaded.
    pub fn news(&self, ticker: &str) -> &[NewsItem] {
        self.stock_data(ticker)
            .map(|s| s.news.as_slice())
            .unwrap_or_default()
    }

    /// Fundamental verdict for `ticker`.
    pub fn fundamental(&self, ticker: &str) -> Option<&FundamentalAnalysis> {
        self.fundamentals.loaded()?.get(ticker)
    }

    /// Technical forecast for `ticker`.
    pub fn technical(&self, ticker: &str) -> Option<&TechnicalForecast> {
        self.technical.loaded()?.get(ticker)
    }

    /// Raw history bars for `ticker`.
    pub fn history(&self, ticker: &str) -> Option<&[HistoryBar]> {
        self.history.loaded()?.get(ticker).map(Vec::as_slice)
    }

    /// History for `ticker` as chart candles.
    pub fn history_points(&self, ticker: &str) -> Vec<StockDataPoint> {
        self.history(ticker).map(history_points).unwrap_or_default()
    }

    /// Forecast for `ticker` as chart candles.
    pub fn forecast_points(&self, ticker: &str) -> Vec<StockDataPoint> {
        self.technical(ticker)
            .map(TechnicalForecast::points)
            .unwrap_or_default()
    }

    /// History followed by forecast, shaped for a candlestick chart.
    pub fn chart(&self, ticker: &str) -> Result<CandlestickChart> {
        let history = self.history_points(ticker);
        let forecast = self.forecast_points(ticker);
        if history.is_empty() && forecast.is_empty() {
            return Err(DashboardError::TickerNotFound(ticker.to_string()));
        }
        Ok(CandlestickChart::build(&history, &forecast))
    }
}
