//! Domain models of the simulator.
//!
//! - `calendar` — weekday arithmetic for trading days.
//! - `generator` — synthetic historical series and forecast continuations.

pub mod calendar;
pub mod generator;
