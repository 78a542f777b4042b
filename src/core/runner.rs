//! Per-symbol analysis pipeline: fetch, compute, evaluate, aggregate.

use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{AnalysisConfig, DEFAULT_FETCH_TIMEOUT_SECONDS};
use crate::error::{SignalError, SignalResult};
use crate::models::price::PriceSeries;
use crate::models::signal::Evaluation;
use crate::services::market_data::{FetchRange, MarketDataProvider};
use crate::signals::aggregation::{Aggregator, AnalysisReport, Diagnostic};
use crate::signals::chart::{build_chart, ChartData};
use crate::signals::evaluator::SignalEvaluator;
use crate::signals::horizons::HORIZON_FETCH_PERIOD;

/// Split free text on commas and whitespace into upper-case symbols,
/// dropping empties and repeats.
pub fn parse_symbols(text: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for raw in text.split(|c: char| c == ',' || c.is_whitespace()) {
        let symbol = raw.trim().to_uppercase();
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

/// Chart series per symbol plus the symbols that could not be charted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    pub charts: Vec<ChartData>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct AnalysisRunner {
    provider: Arc<dyn MarketDataProvider>,
    fetch_timeout: Duration,
}

impl AnalysisRunner {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Fetch with the configured timeout. Timeouts, provider failures and empty
    /// histories all come back as `DataUnavailable`.
    pub async fn fetch(&self, symbol: &str, range: &FetchRange) -> SignalResult<PriceSeries> {
        let series = tokio::time::timeout(self.fetch_timeout, self.provider.fetch(symbol, range))
            .await
            .map_err(|_| {
                SignalError::data_unavailable(
                    symbol,
                    format!("fetch timed out after {:?}", self.fetch_timeout),
                )
            })??;

        if series.is_empty() {
            return Err(SignalError::data_unavailable(
                symbol,
                "no data returned, please check the symbol",
            ));
        }
        debug!(symbol = %symbol, count = series.len(), "Runner: fetched {} bars", series.len());
        Ok(series)
    }

    async fn analyze_symbol(
        &self,
        symbol: String,
        evaluator: &SignalEvaluator,
    ) -> (String, SignalResult<Vec<Evaluation>>) {
        let range = FetchRange::period(HORIZON_FETCH_PERIOD);
        let outcome = match self.fetch(&symbol, &range).await {
            Ok(series) => evaluator.evaluate_all(&series),
            Err(e) => Err(e),
        };
        (symbol, outcome)
    }

    /// Analyse every symbol strictly one after the other.
    pub async fn run(&self, config: &AnalysisConfig) -> SignalResult<AnalysisReport> {
        let (symbols, evaluator) = prepare(config)?;
        info!(
            symbol_count = symbols.len(),
            method = ?config.method,
            "Runner: analysing {} symbols",
            symbols.len()
        );

        let mut aggregator = Aggregator::new();
        for symbol in symbols {
            let (symbol, outcome) = self.analyze_symbol(symbol, &evaluator).await;
            fold(&mut aggregator, &symbol, outcome);
        }
        Ok(aggregator.finish())
    }

    /// Analyse up to `concurrency` symbols at once. Results are folded in input
    /// order, so the report matches [`AnalysisRunner::run`].
    pub async fn run_concurrent(
        &self,
        config: &AnalysisConfig,
        concurrency: usize,
    ) -> SignalResult<AnalysisReport> {
        let (symbols, evaluator) = prepare(config)?;
        let concurrency = concurrency.max(1);
        info!(
            symbol_count = symbols.len(),
            concurrency = concurrency,
            method = ?config.method,
            "Runner: analysing {} symbols with concurrency {}",
            symbols.len(),
            concurrency
        );

        let outcomes: Vec<_> = stream::iter(symbols)
            .map(|symbol| self.analyze_symbol(symbol, &evaluator))
            .buffered(concurrency)
            .collect()
            .await;

        let mut aggregator = Aggregator::new();
        for (symbol, outcome) in outcomes {
            fold(&mut aggregator, &symbol, outcome);
        }
        Ok(aggregator.finish())
    }

    /// Chart series for every symbol over the configured date range.
    pub async fn chart(&self, config: &AnalysisConfig) -> SignalResult<ChartReport> {
        config.validate()?;
        let range = FetchRange::Dates {
            start: config.start_date,
            end: config.end_date,
        };

        let mut charts = Vec::new();
        let mut diagnostics = Vec::new();
        for symbol in parse_symbols(&config.symbols) {
            let chart = match self.fetch(&symbol, &range).await {
                Ok(series) => build_chart(&series, config),
                Err(e) => Err(e),
            };
            match chart {
                Ok(chart) => {
                    debug!(
                        symbol = %symbol,
                        buys = chart.buy_dates().len(),
                        sells = chart.sell_dates().len(),
                        "Runner: built chart"
                    );
                    charts.push(chart);
                }
                Err(e) => diagnostics.push(Diagnostic::new(&symbol, e.to_string())),
            }
        }
        Ok(ChartReport {
            charts,
            diagnostics,
        })
    }
}

fn prepare(config: &AnalysisConfig) -> SignalResult<(Vec<String>, SignalEvaluator)> {
    config.validate()?;
    let evaluator = SignalEvaluator::new(config.method, f64::from(config.buy_threshold))?;
    Ok((parse_symbols(&config.symbols), evaluator))
}

fn fold(aggregator: &mut Aggregator, symbol: &str, outcome: SignalResult<Vec<Evaluation>>) {
    match outcome {
        Ok(evaluations) => {
            for evaluation in evaluations {
                aggregator.record(evaluation);
            }
        }
        Err(e) => aggregator.skip(symbol, e.to_string()),
    }
}
