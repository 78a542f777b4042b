//! RSI (Relative Strength Index) indicator

use crate::error::SignalResult;
use crate::indicators::validate_length;
use crate::models::indicators::{IndicatorKind, IndicatorSeries};
use crate::models::price::PriceSeries;

/// Calculate RSI over closing prices with Wilder smoothing.
///
/// RSI = 100 * avg_gain / (avg_gain + avg_loss)
///
/// The first `length` entries are undefined. With fewer than `length + 1`
/// observations every entry is undefined.
pub fn calculate_rsi(series: &PriceSeries, length: usize) -> SignalResult<IndicatorSeries> {
    validate_length("RSI", length)?;
    Ok(IndicatorSeries::new(
        IndicatorKind::Rsi { length },
        rsi_values(&series.closes(), length),
    ))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(series: &PriceSeries) -> SignalResult<IndicatorSeries> {
    calculate_rsi(series, 14)
}

pub(crate) fn rsi_values(closes: &[f64], length: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if length == 0 || closes.len() < length + 1 {
        return out;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let period = length as f64;
    let mut avg_gain = gains[..length].iter().sum::<f64>() / period;
    let mut avg_loss = losses[..length].iter().sum::<f64>() / period;
    out[length] = Some(rsi_from_averages(avg_gain, avg_loss));

    // change i feeds close index i + 1
    for i in length..gains.len() {
        avg_gain = (avg_gain * (period - 1.0) + gains[i]) / period;
        avg_loss = (avg_loss * (period - 1.0) + losses[i]) / period;
        out[i + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let total = avg_gain + avg_loss;
    if total == 0.0 {
        // flat window
        return 50.0;
    }
    (100.0 * avg_gain / total).clamp(0.0, 100.0)
}
