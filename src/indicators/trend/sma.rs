//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::error::SignalResult;
use crate::indicators::validate_length;
use crate::models::indicators::{IndicatorKind, IndicatorSeries};
use crate::models::price::PriceSeries;

/// Moving-average windows offered as chart overlays.
pub const SHORT_OVERLAY: usize = 50;
pub const LONG_OVERLAY: usize = 200;

/// Calculate the simple moving average of closing prices.
/// The first `length - 1` entries are undefined.
pub fn calculate_sma(series: &PriceSeries, length: usize) -> SignalResult<IndicatorSeries> {
    validate_length("SMA", length)?;
    let closes = math::defined(&series.closes());
    Ok(IndicatorSeries::new(
        IndicatorKind::Sma { length },
        math::sma_series(&closes, length),
    ))
}
