//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::error::SignalResult;
use crate::indicators::validate_length;
use crate::models::indicators::{IndicatorKind, IndicatorSeries};
use crate::models::price::PriceSeries;

/// Calculate EMA of closing prices for a specific period
pub fn calculate_ema(series: &PriceSeries, length: usize) -> SignalResult<IndicatorSeries> {
    validate_length("EMA", length)?;
    let closes = math::defined(&series.closes());
    Ok(IndicatorSeries::new(
        IndicatorKind::Ema { length },
        math::ema_series(&closes, length),
    ))
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(series: &PriceSeries, lengths: &[usize]) -> SignalResult<Vec<IndicatorSeries>> {
    lengths
        .iter()
        .map(|&length| calculate_ema(series, length))
        .collect()
}
