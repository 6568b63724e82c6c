//! Data model types returned by the reporting service.
//!
//! - `report` — snapshot documents (financial reports, fundamental and technical
//!   analysis, price history) and their conversion into chart candles.
pub mod report;
