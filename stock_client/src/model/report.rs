//! Snapshot documents served by the reporting service.
//!
//! Every endpoint answers with the latest stored snapshot: an id, a creation
//! timestamp, and a `stocks` map keyed by ticker symbol. The per-ticker payload
//! differs by endpoint. The service owns these shapes, so decoding is lenient:
//! missing or `null` fields fall back to defaults and unknown fields are ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use stock_common::StockDataPoint;
use stock_common::analysis::{ConfidenceBand, Recommendation};

/// Latest stored snapshot of one report kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Storage id of the snapshot.
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Creation time as written by the service.
    #[serde(default)]
    pub timestamp: Value,
    /// Per-ticker payloads.
    #[serde(default = "BTreeMap::new")]
    pub stocks: BTreeMap<String, T>,
}

impl<T> Snapshot<T> {
    /// Payload for `ticker`, matched case-insensitively.
    pub fn get(&self, ticker: &str) -> Option<&T> {
        self.stocks.get(ticker).or_else(|| {
            self.stocks
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(ticker))
                .map(|(_, value)| value)
        })
    }

    /// Ticker symbols present in the snapshot, sorted.
    pub fn tickers(&self) -> Vec<String> {
        self.stocks.keys().cloned().collect()
    }
}

/// `GET /stocks/financial-reports`.
pub type FinancialReport = Snapshot<StockReport>;
/// `GET /stocks/fundamental-analysis`.
pub type FundamentalReport = Snapshot<FundamentalAnalysis>;
/// `GET /stocks/technical-analysis`.
pub type TechnicalReport = Snapshot<TechnicalForecast>;
/// `GET /stocks/stock-history`.
pub type HistoryReport = Snapshot<Vec<HistoryBar>>;

/// Raw fundamentals and recent news for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    /// Statement metrics, passed through untouched.
    #[serde(default)]
    pub fundamentals: Value,
    /// Recent articles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: Vec<NewsItem>,
}

/// One news article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headline: String,
    /// Short abstract, often empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    /// Link to the full article.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Fundamental verdict for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalAnalysis {
    /// Free text such as `BUY`, `WAIT` or `AVOID`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendation: String,
    /// `High`, `Medium` or `Low`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: String,
    /// Key strength.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pro: String,
    /// Key concern.
    #[serde(default, deserialize_with = "null_as_default")]
    pub con: String,
    /// Overall assessment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

impl FundamentalAnalysis {
    /// Normalised recommendation.
    pub fn verdict(&self) -> Recommendation {
        Recommendation::from_text(&self.recommendation)
    }

    /// Parsed confidence label, `None` if the service wrote something else.
    pub fn confidence_band(&self) -> Option<ConfidenceBand> {
        self.confidence.trim().parse().ok()
    }
}

/// Technical forecast for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalForecast {
    /// Predicted daily bars following the last known session.
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_forecast: Vec<ForecastBar>,
    /// Free text such as `buy`, `sell` or `hold`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendation: String,
    /// Confidence from 0 to 100.
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_level: f64,
    /// Explanation of the recommendation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
    /// Chart patterns supporting the forecast.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detected_patterns: Vec<DetectedPattern>,
}

impl TechnicalForecast {
    /// Normalised recommendation.
    pub fn verdict(&self) -> Recommendation {
        Recommendation::from_text(&self.recommendation)
    }

    /// Confidence clamped into `0..=100`.
    pub fn confidence_percent(&self) -> u8 {
        if self.confidence_level.is_nan() {
            return 0;
        }
        self.confidence_level.round().clamp(0.0, 100.0) as u8
    }

    /// Confidence band of [`Self::confidence_percent`].
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_level(self.confidence_percent())
    }

    /// Forecast bars as chart candles; bars with unreadable dates are skipped.
    pub fn points(&self) -> Vec<StockDataPoint> {
        self.weekly_forecast
            .iter()
            .filter_map(|bar| {
                let point = bar_point(&bar.day, bar.open, bar.high, bar.low, bar.close);
                if point.is_none() {
                    warn!("Skipping forecast bar with unreadable day {:?}", bar.day);
                }
                point
            })
            .collect()
    }
}

/// One predicted session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastBar {
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: String,
    /// Open price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: f64,
    /// High price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub high: f64,
    /// Low price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub low: f64,
    /// Close price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub close: f64,
    /// Shares traded.
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: f64,
    /// Number of trades.
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_count: f64,
    /// Volume-weighted average price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vwap: f64,
}

/// A named chart pattern with the pivots that define it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    /// E.g. `Double Bottom`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pattern_name: String,
    /// Pivots in chronological order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub supporting_points: Vec<SupportingPoint>,
}

/// Pivot of a detected pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingPoint {
    /// `high` or `low`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: String,
    /// Session high.
    #[serde(default, deserialize_with = "null_as_default")]
    pub high: f64,
    /// Session low.
    #[serde(default, deserialize_with = "null_as_default")]
    pub low: f64,
}

/// One historical session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryBar {
    /// Session start, ISO-8601 or `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    /// Open price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: f64,
    /// High price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub high: f64,
    /// Low price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub low: f64,
    /// Close price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub close: f64,
    /// Shares traded.
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: f64,
    /// Number of trades.
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_count: f64,
    /// Volume-weighted average price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vwap: f64,
}

/// History bars as chart candles, sorted by time; unreadable timestamps are skipped.
pub fn history_points(bars: &[HistoryBar]) -> Vec<StockDataPoint> {
    let mut points: Vec<StockDataPoint> = bars
        .iter()
        .filter_map(|bar| {
            let point = bar_point(&bar.timestamp, bar.open, bar.high, bar.low, bar.close);
            if point.is_none() {
                warn!("Skipping history bar with unreadable timestamp {:?}", bar.timestamp);
            }
            point
        })
        .collect();
    points.sort_by_key(|p| p.x);
    points
}

/// Reads `null` as the field's default, so one empty field does not reject the snapshot.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn bar_point(when: &str, open: f64, high: f64, low: f64, close: f64) -> Option<StockDataPoint> {
    parse_millis(when).map(|x| StockDataPoint::new(x, open, high, low, close))
}

/// Milliseconds since epoch for the timestamp formats the service emits.
pub fn parse_millis(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const APRIL_5: i64 = 1_712_275_200_000;

    #[test]
    fn financial_report_decodes_with_news() {
        let body = json!({
            "_id": "665f",
            "timestamp": "2024-04-05T10:00:00",
            "stocks": {
                "AAPL": {
                    "fundamentals": {"pe": 28.1},
                    "news": [{"headline": "Apple ships", "summary": "", "url": "https://x"}]
                },
                "TSLA": {"fundamentals": {}}
            }
        });
        let report: FinancialReport = serde_json::from_value(body).unwrap();
        assert_eq!(report.id, "665f");
        assert_eq!(report.tickers(), vec!["AAPL", "TSLA"]);
        assert_eq!(report.get("aapl").unwrap().news[0].headline, "Apple ships");
        assert!(report.get("TSLA").unwrap().news.is_empty());
        assert!(report.get("NVDA").is_none());
    }

    #[test]
    fn technical_forecast_converts_bars() {
        let body = json!({
            "stocks": {"NVDA": {
                "weekly_forecast": [
                    {"day": "2024-04-08", "open": 10.0, "high": 11.0, "low": 9.5, "close": 10.5, "volume": 100},
                    {"day": "not a day", "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0}
                ],
                "recommendation": "Strong Buy",
                "confidence_level": 72,
                "reasoning": "Higher lows",
                "detected_patterns": [{
                    "pattern_name": "Ascending Triangle",
                    "supporting_points": [{"type": "low", "day": "2024-04-01", "high": 9.0, "low": 8.0}]
                }]
            }}
        });
        let report: TechnicalReport = serde_json::from_value(body).unwrap();
        let forecast = report.get("NVDA").unwrap();
        assert_eq!(forecast.verdict(), Recommendation::Buy);
        assert_eq!(forecast.confidence_band(), ConfidenceBand::High);
        assert_eq!(forecast.detected_patterns[0].supporting_points[0].kind, "low");

        let points = forecast.points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, APRIL_5 + 3 * 86_400_000);
        assert_eq!(points[0].c, 10.5);
    }

    #[test]
    fn confidence_percent_is_clamped() {
        let mut forecast = TechnicalForecast {
            confidence_level: 140.0,
            ..TechnicalForecast::default()
        };
        assert_eq!(forecast.confidence_percent(), 100);
        forecast.confidence_level = -3.0;
        assert_eq!(forecast.confidence_percent(), 0);
        forecast.confidence_level = f64::NAN;
        assert_eq!(forecast.confidence_percent(), 0);
    }

    #[test]
    fn fundamental_labels_parse() {
        let analysis = FundamentalAnalysis {
            recommendation: "WAIT".into(),
            confidence: " medium ".into(),
            ..FundamentalAnalysis::default()
        };
        assert_eq!(analysis.verdict(), Recommendation::Hold);
        assert_eq!(analysis.confidence_band(), Some(ConfidenceBand::Medium));
    }

    #[test]
    fn history_points_sorted_and_filtered() {
        let bars = vec![
            HistoryBar {
                timestamp: "2024-04-08 04:00:00+00:00".into(),
                open: 2.0,
                high: 3.0,
                low: 1.0,
                close: 2.5,
                ..HistoryBar::default()
            },
            HistoryBar {
                timestamp: "2024-04-05T04:00:00Z".into(),
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
                ..HistoryBar::default()
            },
            HistoryBar {
                timestamp: "garbage".into(),
                ..HistoryBar::default()
            },
        ];
        let points = history_points(&bars);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, APRIL_5 + 4 * 3_600_000);
        assert_eq!(points[1].x, APRIL_5 + 3 * 86_400_000 + 4 * 3_600_000);
    }

    #[test]
    fn parse_millis_formats() {
        assert_eq!(parse_millis("2024-04-05"), Some(APRIL_5));
        assert_eq!(parse_millis("2024-04-05T00:00:00"), Some(APRIL_5));
        assert_eq!(parse_millis("2024-04-05T02:00:00+02:00"), Some(APRIL_5));
        assert_eq!(parse_millis("05/04/2024"), None);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let body = json!({
            "stocks": {"AAPL": {
                "fundamentals": null,
                "news": [{"headline": "h", "summary": null, "url": null}]
            }}
        });
        let report: FinancialReport = serde_json::from_value(body).unwrap();
        let news = &report.get("AAPL").unwrap().news;
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].headline, "h");
        assert!(news[0].summary.is_empty());
        assert!(news[0].url.is_empty());

        let body = json!({"stocks": {"AAPL": [{
            "timestamp": "2024-04-05", "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5,
            "volume": null, "trade_count": null, "vwap": null
        }]}});
        let history: HistoryReport = serde_json::from_value(body).unwrap();
        let bars = history.get("AAPL").unwrap();
        assert_eq!(bars[0].vwap, 0.0);
        assert_eq!(history_points(bars)[0].x, APRIL_5);

        let body = json!({"stocks": {"NVDA": {
            "weekly_forecast": [{"day": "2024-04-08", "open": 10.0, "high": 11.0, "low": 9.0, "close": 10.5, "vwap": null}],
            "recommendation": null,
            "confidence_level": null,
            "detected_patterns": null
        }}});
        let technical: TechnicalReport = serde_json::from_value(body).unwrap();
        let forecast = technical.get("NVDA").unwrap();
        assert_eq!(forecast.confidence_percent(), 0);
        assert_eq!(forecast.verdict(), Recommendation::Hold);
        assert_eq!(forecast.points().len(), 1);
    }

    #[test]
    fn empty_document_decodes() {
        let report: HistoryReport = serde_json::from_value(json!({})).unwrap();
        assert!(report.stocks.is_empty());
    }
}
