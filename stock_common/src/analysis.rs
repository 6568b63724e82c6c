//! Interpretation helpers for analysis verdicts.
//!
//! The reporting service writes recommendations and confidence as free text
//! (`"BUY"`, `"strong buy"`, `"WAIT"`, `"High"`) or as a 0-100 level. These
//! helpers normalise both into small enums the panels can colour and sort.

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Normalised trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Recommendation {
    /// Buy or strong buy.
    Buy,
    /// Hold, wait, or anything neutral.
    Hold,
    /// Sell or avoid.
    Sell,
}

impl Recommendation {
    /// Classify free text. `buy`/`strong` win over `sell`/`avoid`; everything else holds.
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("buy") || lower.contains("strong") {
            Recommendation::Buy
        } else if lower.contains("sell") || lower.contains("avoid") {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }
}

/// Three-step confidence scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ConfidenceBand {
    /// Below 40.
    Low,
    /// 40 to 69.
    Medium,
    /// 70 and above.
    High,
}

impl ConfidenceBand {
    /// Band for a 0-100 confidence level.
    pub fn from_level(level: u8) -> Self {
        match level {
            70.. => ConfidenceBand::High,
            40..=69 => ConfidenceBand::Medium,
            _ => ConfidenceBand::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_text_variants() {
        assert_eq!(Recommendation::from_text("BUY"), Recommendation::Buy);
        assert_eq!(Recommendation::from_text("Strong"), Recommendation::Buy);
        assert_eq!(Recommendation::from_text("sell"), Recommendation::Sell);
        assert_eq!(Recommendation::from_text("AVOID"), Recommendation::Sell);
        assert_eq!(Recommendation::from_text("WAIT"), Recommendation::Hold);
        assert_eq!(Recommendation::from_text(""), Recommendation::Hold);
        assert_eq!(Recommendation::Buy.to_string(), "BUY");
    }

    #[test]
    fn confidence_band_edges() {
        assert_eq!(ConfidenceBand::from_level(0), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_level(39), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_level(40), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_level(69), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_level(70), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_level(100), ConfidenceBand::High);
    }

    #[test]
    fn confidence_band_parses_labels() {
        assert_eq!("high".parse::<ConfidenceBand>().unwrap(), ConfidenceBand::High);
        assert_eq!("Medium".parse::<ConfidenceBand>().unwrap(), ConfidenceBand::Medium);
        assert!("certain".parse::<ConfidenceBand>().is_err());
    }
}
