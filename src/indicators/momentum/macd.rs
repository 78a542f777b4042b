//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::error::SignalResult;
use crate::models::indicators::{MacdParams, MacdSeries};
use crate::models::price::PriceSeries;

/// Calculate the MACD line, signal line and histogram.
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD, started at the first defined MACD value
/// Histogram = MACD - Signal
///
/// A slow period shorter than the fast one is swapped, so `(26, 12)` means the
/// same as `(12, 26)`.
pub fn calculate_macd(series: &PriceSeries, params: MacdParams) -> SignalResult<MacdSeries> {
    params.validate()?;
    let params = if params.slow < params.fast {
        MacdParams::new(params.slow, params.fast, params.signal)
    } else {
        params
    };

    let closes = math::defined(&series.closes());
    let fast_ema = math::ema_series(&closes, params.fast);
    let slow_ema = math::ema_series(&closes, params.slow);

    let macd = math::difference(&fast_ema, &slow_ema);
    let signal = math::ema_series(&macd, params.signal);
    let histogram = math::difference(&macd, &signal);

    Ok(MacdSeries {
        params,
        macd,
        signal,
        histogram,
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(series: &PriceSeries) -> SignalResult<MacdSeries> {
    calculate_macd(series, MacdParams::default())
}
