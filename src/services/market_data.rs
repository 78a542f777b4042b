//! Market data provider interface.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::SignalResult;
use crate::models::price::PriceSeries;

/// How much history to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRange {
    /// A provider period string such as `6mo` or `2y`.
    Period(String),
    /// Daily bars from `start` (inclusive) to `end` (exclusive).
    Dates { start: NaiveDate, end: NaiveDate },
}

impl FetchRange {
    pub fn period(period: impl Into<String>) -> Self {
        Self::Period(period.into())
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily price history for `symbol`. An empty series means "no data for
    /// this symbol" and is not an error.
    async fn fetch(&self, symbol: &str, range: &FetchRange) -> SignalResult<PriceSeries>;
}

/// Serves fixed series from memory; unknown symbols yield an empty series.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol().to_string(), series);
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn fetch(&self, symbol: &str, _range: &FetchRange) -> SignalResult<PriceSeries> {
        Ok(self
            .series
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| PriceSeries::empty(symbol)))
    }
}
