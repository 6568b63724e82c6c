//! Ticker symbols and helpers shared between the simulator and the client.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum_macros::{Display, EnumString};

use crate::error::DashboardError;

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace, or new lines. Returns an
    /// error on the first symbol that is not a known `Ticker`.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, DashboardError>;

    /// Parses a single comma/whitespace separated list such as `"AAPL, tsla NVDA"`.
    fn parse_list(text: &str) -> Result<Vec<Ticker>, DashboardError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, DashboardError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(DashboardError::Io)?;
            for ticker in Self::parse_list(&line)? {
                if !tickers.contains(&ticker) {
                    tickers.push(ticker);
                }
            }
        }
        Ok(tickers)
    }

    fn parse_list(text: &str) -> Result<Vec<Self>, DashboardError> {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<Self>()
                    .map_err(|e| DashboardError::ParseTickersFile(format!("{token}: {e}")))
            })
            .collect()
    }
}

/// Set of symbols covered by the reporting service.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[clap(rename_all = "UPPER")]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    AAPL,
    TSLA,
    NVDA,
    GOOG,
    GOOGL,
    MSFT,
    AMZN,
    META,
    NFLX,
    AMD,
    INTC,
    JPM,
    V,
    DIS,
}

impl Ticker {
    /// Symbols shown by default in the dashboard selector.
    pub const DEFAULT_SELECTION: [Ticker; 3] = [Ticker::AAPL, Ticker::TSLA, Ticker::NVDA];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_mixed_separators_case_insensitively() {
        let tickers = Ticker::parse_list("aapl, TSLA\tnvda").unwrap();
        assert_eq!(tickers, vec![Ticker::AAPL, Ticker::TSLA, Ticker::NVDA]);
    }

    #[test]
    fn file_parsing_skips_blank_lines_and_duplicates() {
        let input = Cursor::new("AAPL\n\nGOOG, AAPL\n  \nMSFT\n");
        let tickers = Ticker::parse_from_file(input).unwrap();
        assert_eq!(tickers, vec![Ticker::AAPL, Ticker::GOOG, Ticker::MSFT]);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = Ticker::parse_list("AAPL XYZQ").unwrap_err();
        assert!(matches!(err, DashboardError::ParseTickersFile(msg) if msg.starts_with("XYZQ")));
    }

    #[test]
    fn display_matches_service_keys() {
        assert_eq!(Ticker::GOOGL.to_string(), "GOOGL");
    }
}
