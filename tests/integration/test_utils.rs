//! Providers and series shared by the integration tests

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use stockpicker::core::runner::AnalysisRunner;
use stockpicker::error::{SignalError, SignalResult};
use stockpicker::models::price::{PriceBar, PriceSeries};
use stockpicker::services::market_data::{
    FetchRange, InMemoryMarketDataProvider, MarketDataProvider,
};

pub fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(start + Days::new(i as u64), close, close, close, close, 10_000)
        })
        .collect();
    PriceSeries::new(symbol, bars).unwrap()
}

/// Steady decline that stalls: RSI pinned at zero on every horizon.
pub fn falling_then_flat(symbol: &str) -> PriceSeries {
    let mut closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    closes.extend(std::iter::repeat(81.0).take(40));
    series(symbol, &closes)
}

/// Steady rally: RSI pinned at 100.
pub fn rising(symbol: &str) -> PriceSeries {
    let closes: Vec<f64> = (0..60).map(|i| 50.0 + i as f64).collect();
    series(symbol, &closes)
}

pub fn wave(symbol: &str, count: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..count)
        .map(|i| 100.0 + 10.0 * (i as f64 / 7.0).sin() + 0.05 * i as f64)
        .collect();
    series(symbol, &closes)
}

pub fn fixture_provider() -> InMemoryMarketDataProvider {
    InMemoryMarketDataProvider::new()
        .with_series(falling_then_flat("DOWN"))
        .with_series(rising("UP"))
        .with_series(wave("WAVE", 260))
        .with_series(series("NEW", &[10.0, 11.0, 10.5, 11.5, 12.0, 11.0, 12.5, 13.0, 12.0, 13.5, 14.0, 13.0, 14.5, 15.0, 14.0]))
}

pub fn fixture_runner() -> AnalysisRunner {
    AnalysisRunner::new(Arc::new(fixture_provider()))
}

/// Never answers within a reasonable timeout.
pub struct SlowProvider;

#[async_trait]
impl MarketDataProvider for SlowProvider {
    async fn fetch(&self, symbol: &str, _range: &FetchRange) -> SignalResult<PriceSeries> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok(rising(symbol))
    }
}

/// Fails every request the way an unreachable upstream does.
pub struct FailingProvider;

#[async_trait]
impl MarketDataProvider for FailingProvider {
    async fn fetch(&self, symbol: &str, _range: &FetchRange) -> SignalResult<PriceSeries> {
        Err(SignalError::data_unavailable(symbol, "connection refused"))
    }
}
