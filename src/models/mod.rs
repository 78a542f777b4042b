//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod signal;

pub use indicators::{IndicatorKind, IndicatorSeries, MacdParams, MacdSeries};
pub use price::{PriceBar, PriceSeries};
pub use signal::{Classification, Evaluation, Horizon, SignalRecord};
