//! Candlestick chart input shaping.
//!
//! Turns historical and predicted `StockDataPoint` series into the column layout
//! a category-axis candlestick chart consumes: one shared list of date labels,
//! candle rows ordered `[open, close, low, high]`, the prediction series padded
//! so it lines up after the history, and simple moving averages over the
//! combined close prices. The result is plain data and serializes to JSON.

use serde::Serialize;

use crate::ohlc::{StockDataPoint, round2};

/// Moving-average windows drawn over the candles.
pub const MA_WINDOWS: [usize; 4] = [5, 10, 20, 30];

/// Number of trailing candles the initial zoom window shows.
pub const VISIBLE_DAYS: usize = 30;

/// A candle row in `[open, close, low, high]` order.
pub type CandleRow = [f64; 4];

/// Named moving-average line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverage {
    /// Series label, e.g. `MA5`.
    pub name: String,
    /// Window length in candles.
    pub window: usize,
    /// One entry per date label; `None` while the window is still filling.
    pub values: Vec<Option<f64>>,
}

/// Chart-ready columns for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickChart {
    /// `YYYY/MM/DD` labels, history first, then prediction.
    pub dates: Vec<String>,
    /// Historical candles, one per leading date label.
    pub historical: Vec<CandleRow>,
    /// Prediction candles aligned to `dates`: `None` for every historical slot.
    pub prediction: Vec<Option<CandleRow>>,
    /// Moving averages over the combined close series.
    pub moving_averages: Vec<MovingAverage>,
    /// Lowest low and highest high across both series, padded by 5% of the span.
    pub y_range: Option<(f64, f64)>,
    /// Initial zoom start, in percent of the x axis.
    pub zoom_start_percent: f64,
}

impl CandlestickChart {
    /// Shape `history` followed by an optional `prediction` continuation.
    pub fn build(history: &[StockDataPoint], prediction: &[StockDataPoint]) -> Self {
        let dates: Vec<String> = history
            .iter()
            .chain(prediction)
            .map(date_label)
            .collect();

        let historical = history.iter().map(candle_row).collect();

        let prediction_rows = if prediction.is_empty() {
            Vec::new()
        } else {
            std::iter::repeat_n(None, history.len())
                .chain(prediction.iter().map(|p| Some(candle_row(p))))
                .collect()
        };

        let closes: Vec<f64> = history.iter().chain(prediction).map(|p| p.c).collect();
        let moving_averages = MA_WINDOWS
            .iter()
            .map(|&window| MovingAverage {
                name: format!("MA{window}"),
                window,
                values: moving_average(&closes, window),
            })
            .collect();

        let zoom_start_percent = if dates.is_empty() {
            0.0
        } else {
            ((1.0 - VISIBLE_DAYS as f64 / dates.len() as f64) * 100.0).max(0.0)
        };

        Self {
            y_range: price_range(history.iter().chain(prediction)),
            dates,
            historical,
            prediction: prediction_rows,
            moving_averages,
            zoom_start_percent,
        }
    }

    /// Number of x-axis slots.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// No candles at all.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Simple moving average of `closes`.
///
/// Index `i` stays empty while `i < window`; afterwards it holds the mean of the
/// `window` closes ending at `i`, rounded to cents. A zero window yields all `None`.
pub fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    closes
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if window == 0 || i < window {
                return None;
            }
            let sum: f64 = closes[i + 1 - window..=i].iter().sum();
            Some(round2(sum / window as f64))
        })
        .collect()
}

fn candle_row(p: &StockDataPoint) -> CandleRow {
    [p.o, p.c, p.l, p.h]
}

fn date_label(p: &StockDataPoint) -> String {
    p.date()
        .map(|d| d.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn price_range<'a>(points: impl Iterator<Item = &'a StockDataPoint>) -> Option<(f64, f64)> {
    let (low, high) = points.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.l), hi.max(p.h))
    });
    if !low.is_finite() || !high.is_finite() {
        return None;
    }
    let pad = (high - low) * 0.05;
    Some((round2((low - pad).max(0.0)), round2(high + pad)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;
    // 2024-04-01T00:00:00Z
    const APRIL_1: i64 = 1_711_929_600_000;

    fn point(day: i64, o: f64, c: f64) -> StockDataPoint {
        StockDataPoint::new(APRIL_1 + day * DAY_MS, o, o.max(c) + 1.0, o.min(c) - 1.0, c)
    }

    #[test]
    fn moving_average_waits_for_window() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ma = moving_average(&closes, 2);
        assert_eq!(ma, vec![None, None, Some(2.5), Some(3.5), Some(4.5)]);
    }

    #[test]
    fn moving_average_zero_window_is_empty() {
        assert!(moving_average(&[1.0, 2.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn build_lays_out_history_then_prediction() {
        let history = vec![point(0, 10.0, 11.0), point(1, 11.0, 10.5)];
        let prediction = vec![point(2, 10.5, 12.0)];
        let chart = CandlestickChart::build(&history, &prediction);

        assert_eq!(chart.dates, vec!["2024/04/01", "2024/04/02", "2024/04/03"]);
        assert_eq!(chart.historical[0], [10.0, 11.0, 9.0, 12.0]);
        assert_eq!(chart.prediction, vec![None, None, Some([10.5, 12.0, 9.5, 13.0])]);
        assert_eq!(chart.moving_averages.len(), MA_WINDOWS.len());
        assert!(chart.moving_averages.iter().all(|ma| ma.values.len() == 3));
        assert_eq!(chart.zoom_start_percent, 0.0);
    }

    #[test]
    fn history_only_has_no_prediction_column() {
        let chart = CandlestickChart::build(&[point(0, 10.0, 11.0)], &[]);
        assert!(chart.prediction.is_empty());
        assert_eq!(chart.len(), 1);
    }

    #[test]
    fn y_range_pads_extremes() {
        let chart = CandlestickChart::build(&[point(0, 10.0, 20.0)], &[]);
        // low 9, high 21, span 12, pad 0.6
        assert_eq!(chart.y_range, Some((8.4, 21.6)));
    }

    #[test]
    fn zoom_shows_trailing_window() {
        let history: Vec<_> = (0..60).map(|d| point(d, 10.0, 10.0)).collect();
        let chart = CandlestickChart::build(&history, &[]);
        assert_eq!(chart.zoom_start_percent, 50.0);
    }

    #[test]
    fn empty_input_is_empty_chart() {
        let chart = CandlestickChart::build(&[], &[]);
        assert!(chart.is_empty());
        assert_eq!(chart.y_range, None);
    }
}
