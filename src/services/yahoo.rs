//! Yahoo Finance chart-API market data provider

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::DEFAULT_YAHOO_BASE_URL;
use crate::error::{SignalError, SignalResult};
use crate::models::price::{PriceBar, PriceSeries};
use crate::services::market_data::{FetchRange, MarketDataProvider};

const DAILY_INTERVAL: &str = "1d";
const DEFAULT_MAX_RETRIES: usize = 2;

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: Option<String>,
}

pub struct YahooMarketDataProvider {
    client: Client,
    base_url: String,
    max_retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_YAHOO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn chart_url(&self, symbol: &str, range: &FetchRange) -> SignalResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SignalError::InvalidParameter(format!("bad chart URL: {}", e)))?;
        // one percent-encoded segment, so `?`, `#` and `/` stay part of the symbol
        url.path_segments_mut()
            .map_err(|_| {
                SignalError::InvalidParameter(format!("bad chart URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(symbol);
        {
            let mut query = url.query_pairs_mut();
            match range {
                FetchRange::Period(period) => {
                    query.append_pair("range", period);
                }
                FetchRange::Dates { start, end } => {
                    query.append_pair("period1", &midnight_timestamp(*start).to_string());
                    query.append_pair("period2", &midnight_timestamp(*end).to_string());
                }
            }
            query.append_pair("interval", DAILY_INTERVAL);
        }
        Ok(url)
    }

    /// `None` when Yahoo does not know the symbol.
    async fn request(&self, url: Url) -> Result<Option<YahooResponse>, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.error_for_status()?.json::<YahooResponse>().await?;
        Ok(Some(body))
    }
}

impl Default for YahooMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch(&self, symbol: &str, range: &FetchRange) -> SignalResult<PriceSeries> {
        let url = self.chart_url(symbol, range)?;
        debug!(symbol = %symbol, url = %url, "Yahoo: requesting chart");

        let response = (|| self.request(url.clone()))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(is_transient)
            .notify(|err, delay| {
                warn!(symbol = %symbol, error = %err, ?delay, "Yahoo: retrying chart request");
            })
            .await
            .map_err(|e| SignalError::data_unavailable(symbol, e.to_string()))?;

        let Some(response) = response else {
            debug!(symbol = %symbol, "Yahoo: symbol not found");
            return Ok(PriceSeries::empty(symbol));
        };
        parse_chart(symbol, response)
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout()
        || err.is_connect()
        || err.status().is_some_and(|s| s.is_server_error())
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn parse_chart(symbol: &str, response: YahooResponse) -> SignalResult<PriceSeries> {
    if let Some(error) = response.chart.error {
        debug!(
            symbol = %symbol,
            code = %error.code,
            description = ?error.description,
            "Yahoo: chart error, treating as no data"
        );
        return Ok(PriceSeries::empty(symbol));
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(symbol));
    };
    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

    // exchange-local date; a repeated date keeps the latest row
    let mut bars: BTreeMap<NaiveDate, PriceBar> = BTreeMap::new();
    let mut dropped = 0usize;
    for (i, ts) in timestamps.iter().enumerate() {
        let at = |column: &[Option<f64>]| column.get(i).copied().flatten();
        let fields = (
            DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()),
            at(&quote.open),
            at(&quote.high),
            at(&quote.low),
            at(&quote.close),
            at(&quote.volume),
        );
        match fields {
            (Some(date), Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                bars.insert(date, PriceBar::new(date, open, high, low, close, volume as u64));
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(symbol = %symbol, dropped = dropped, "Yahoo: dropped incomplete rows");
    }
    PriceSeries::new(symbol, bars.into_values().collect())
}
