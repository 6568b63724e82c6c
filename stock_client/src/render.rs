//! Plain-text panels for the terminal.
//!
//! Each panel writes to any `io::Write`, so the CLI prints to stdout and tests
//! render into a buffer. Failed panels print their generic message instead.
use std::io::Write;

use stock_common::Result;

use crate::dashboard::Dashboard;
use crate::fetcher::ReportSource;
use crate::model::report::{FundamentalAnalysis, NewsItem, TechnicalForecast};

/// Width of the confidence gauge, in characters.
const GAUGE_WIDTH: usize = 20;

/// Full overview of one ticker: technical panel with price summary, fundamental
/// panel, then news cards.
pub fn render_overview<W: Write, S: ReportSource + 'static>(
    out: &mut W,
    dashboard: &Dashboard<S>,
    ticker: &str,
) -> Result<()> {
    writeln!(out, "==================== {ticker} ====================")?;

    writeln!(out, "\nTechnical Analysis:")?;
    match (dashboard.technical.error(), dashboard.technical(ticker)) {
        (Some(message), _) => writeln!(out, "  {message}")?,
        (None, Some(forecast)) => technical_panel(out, forecast)?,
        (None, None) => writeln!(out, "  No technical analysis for {ticker}")?,
    }
    price_summary(out, dashboard, ticker)?;

    writeln!(out, "\nFundamental Analysis:")?;
    match (dashboard.fundamentals.error(), dashboard.fundamental(ticker)) {
        (Some(message), _) => writeln!(out, "  {message}")?,
        (None, Some(analysis)) => fundamental_panel(out, analysis)?,
        (None, None) => writeln!(out, "  No fundamental analysis for {ticker}")?,
    }

    writeln!(out, "\nNews:")?;
    match dashboard.report.error() {
        Some(message) => writeln!(out, "  {message}")?,
        None => news_cards(out, dashboard.news(ticker))?,
    }
    Ok(())
}

/// Recommendation, confidence gauge, reasoning and detected patterns.
pub fn technical_panel<W: Write>(out: &mut W, forecast: &TechnicalForecast) -> Result<()> {
    writeln!(
        out,
        "  Recommendation: {} ({})",
        forecast.recommendation.to_uppercase(),
        forecast.verdict()
    )?;
    writeln!(
        out,
        "  Confidence:     {} {}",
        confidence_bar(forecast.confidence_percent()),
        forecast.confidence_band()
    )?;
    if !forecast.reasoning.is_empty() {
        writeln!(out, "  Reasoning:      {}", forecast.reasoning)?;
    }
    for pattern in &forecast.detected_patterns {
        let days: Vec<&str> = pattern
            .supporting_points
            .iter()
            .map(|p| p.day.as_str())
            .collect();
        writeln!(out, "  Pattern:        {} [{}]", pattern.pattern_name, days.join(", "))?;
    }
    Ok(())
}

/// Recommendation, confidence, pro, con and summary.
pub fn fundamental_panel<W: Write>(out: &mut W, analysis: &FundamentalAnalysis) -> Result<()> {
    let band = analysis
        .confidence_band()
        .map(|b| b.to_string())
        .unwrap_or_else(|| analysis.confidence.clone());
    writeln!(
        out,
        "  Recommendation: {} ({})",
        analysis.recommendation.to_uppercase(),
        analysis.verdict()
    )?;
    writeln!(out, "  Confidence:     {band}")?;
    writeln!(out, "  Pro:            {}", analysis.pro)?;
    writeln!(out, "  Con:            {}", analysis.con)?;
    writeln!(out, "  Summary:        {}", analysis.summary)?;
    Ok(())
}

/// One card per article; the summary line is omitted when empty.
pub fn news_cards<W: Write>(out: &mut W, news: &[NewsItem]) -> Result<()> {
    if news.is_empty() {
        writeln!(out, "  No news")?;
        return Ok(());
    }
    for item in news {
        writeln!(out, "  * {}", item.headline)?;
        if !item.summary.is_empty() {
            writeln!(out, "    {}", item.summary)?;
        }
        writeln!(out, "    Read more: {}", item.url)?;
    }
    Ok(())
}

/// `[#####---------------]  25%` style gauge for a 0-100 level.
pub fn confidence_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = GAUGE_WIDTH * percent as usize / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        percent
    )
}

fn price_summary<W: Write, S: ReportSource + 'static>(
    out: &mut W,
    dashboard: &Dashboard<S>,
    ticker: &str,
) -> Result<()> {
    if let Some(message) = dashboard.history.error() {
        writeln!(out, "  Price history: {message}")?;
        return Ok(());
    }
    let history = dashboard.history_points(ticker);
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        writeln!(out, "  Price history: none for {ticker}")?;
        return Ok(());
    };
    let change = if first.o > 0.0 {
        (last.c - first.o) / first.o * 100.0
    } else {
        0.0
    };
    writeln!(
        out,
        "  Price history:  {} sessions, last close {:.2} ({:+.2}% over the period)",
        history.len(),
        last.c,
        change
    )?;
    if let Some(forecast) = dashboard.forecast_points(ticker).last() {
        writeln!(out, "  Forecast close: {:.2}", forecast.c)?;
    }
    Ok(())
}
