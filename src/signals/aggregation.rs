//! Per-horizon bucketing of evaluations across symbols

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::signal::{Classification, Evaluation, Horizon, SignalRecord};

/// A human-readable problem with one symbol. Never fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub symbol: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}

/// BUY records per horizon, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonBuckets(BTreeMap<Horizon, Vec<SignalRecord>>);

impl HorizonBuckets {
    fn new() -> Self {
        Self(Horizon::ALL.iter().map(|&h| (h, Vec::new())).collect())
    }

    fn push(&mut self, record: SignalRecord) {
        self.0.entry(record.horizon()).or_default().push(record);
    }

    pub fn get(&self, horizon: Horizon) -> &[SignalRecord] {
        self.0.get(&horizon).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, horizon: Horizon, symbol: &str) -> bool {
        self.get(horizon).iter().any(|r| r.symbol() == symbol)
    }

    pub fn symbols(&self, horizon: Horizon) -> Vec<&str> {
        self.get(horizon).iter().map(|r| r.symbol()).collect()
    }
}

/// Finalised output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub buys: HorizonBuckets,
    /// SELL overlays, short horizon only.
    pub sells: Vec<SignalRecord>,
    /// Symbols with a BUY on both the short and the medium horizon.
    pub intersection: Vec<String>,
    pub indeterminate: Vec<SignalRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Accumulates evaluations symbol by symbol.
pub struct Aggregator {
    buys: HorizonBuckets,
    sells: Vec<SignalRecord>,
    indeterminate: Vec<SignalRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            buys: HorizonBuckets::new(),
            sells: Vec::new(),
            indeterminate: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn record(&mut self, evaluation: Evaluation) {
        let Evaluation {
            record,
            sell_overlay,
        } = evaluation;

        match record.classification() {
            Classification::Buy => {
                debug!(symbol = %record.symbol(), horizon = %record.horizon(), "Aggregator: BUY");
                self.buys.push(record);
            }
            Classification::Indeterminate => {
                self.diagnostics.push(Diagnostic::new(
                    record.symbol(),
                    format!(
                        "{} horizon: not enough history to classify",
                        record.horizon()
                    ),
                ));
                self.indeterminate.push(record);
            }
            Classification::DontBuy | Classification::Sell => {}
        }

        if let Some(sell) = sell_overlay {
            if sell.horizon().is_shortest() {
                debug!(symbol = %sell.symbol(), "Aggregator: SELL overlay");
                self.sells.push(sell);
            }
        }
    }

    pub fn skip(&mut self, symbol: &str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(symbol = %symbol, reason = %reason, "Aggregator: skipping {}", symbol);
        self.diagnostics.push(Diagnostic::new(symbol, reason));
    }

    pub fn buckets(&self) -> &HorizonBuckets {
        &self.buys
    }

    pub fn intersection(&self) -> Vec<String> {
        self.buys
            .symbols(Horizon::Short)
            .into_iter()
            .filter(|symbol| self.buys.contains(Horizon::Medium, symbol))
            .map(str::to_string)
            .collect()
    }

    pub fn finish(self) -> AnalysisReport {
        let intersection = self.intersection();
        AnalysisReport {
            buys: self.buys,
            sells: self.sells,
            intersection,
            indeterminate: self.indeterminate,
            diagnostics: self.diagnostics,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
