//! Indicator specifications and dispatch

use serde::{Deserialize, Serialize};

use crate::error::SignalResult;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::trend::{calculate_ema, calculate_sma};
use crate::models::indicators::{IndicatorSeries, MacdParams, MacdSeries};
use crate::models::price::PriceSeries;

/// What to compute over a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "indicator", rename_all = "UPPERCASE")]
pub enum IndicatorSpec {
    Rsi { length: usize },
    Sma { length: usize },
    Ema { length: usize },
    Macd(MacdParams),
}

/// Result of computing an [`IndicatorSpec`].
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    Line(IndicatorSeries),
    Macd(MacdSeries),
}

impl IndicatorOutput {
    pub fn label(&self) -> String {
        match self {
            Self::Line(series) => series.label(),
            Self::Macd(series) => series.label(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Line(series) => series.len(),
            Self::Macd(series) => series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IndicatorSpec {
    pub fn macd(fast: usize, slow: usize) -> Self {
        Self::Macd(MacdParams::with_default_signal(fast, slow))
    }

    pub fn compute(&self, series: &PriceSeries) -> SignalResult<IndicatorOutput> {
        Ok(match *self {
            Self::Rsi { length } => IndicatorOutput::Line(calculate_rsi(series, length)?),
            Self::Sma { length } => IndicatorOutput::Line(calculate_sma(series, length)?),
            Self::Ema { length } => IndicatorOutput::Line(calculate_ema(series, length)?),
            Self::Macd(params) => IndicatorOutput::Macd(calculate_macd(series, params)?),
        })
    }
}
