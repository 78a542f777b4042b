//! Price series builders shared by the unit tests

use chrono::{Days, NaiveDate};
use stockpicker::models::price::{PriceBar, PriceSeries};

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn series_from_closes(symbol: &str, closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let date = start_date() + Days::new(i as u64);
            PriceBar::new(date, close, close + 0.5, close - 0.5, close, 1_000 + i as u64)
        })
        .collect();
    PriceSeries::new(symbol, bars).unwrap()
}

/// `count` closes stepping by `step` from `start`.
pub fn linear(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// 20 strictly falling closes followed by `flat` unchanged ones.
pub fn falling_then_flat(flat: usize) -> Vec<f64> {
    let mut closes = linear(100.0, -1.0, 20);
    let last = *closes.last().unwrap();
    closes.extend(std::iter::repeat(last).take(flat));
    closes
}

pub fn wave(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + 10.0 * (i as f64 / 7.0).sin() + 0.05 * i as f64)
        .collect()
}
