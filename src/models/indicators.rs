use serde::{Deserialize, Serialize};

use crate::error::{SignalError, SignalResult};

/// Which single-line indicator a series holds, with its window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    Rsi { length: usize },
    Sma { length: usize },
    Ema { length: usize },
}

impl IndicatorKind {
    pub fn label(&self) -> String {
        match self {
            Self::Rsi { length } => format!("RSI_{}", length),
            Self::Sma { length } => format!("SMA_{}", length),
            Self::Ema { length } => format!("EMA_{}", length),
        }
    }
}

/// A named series aligned index-for-index with the price series it came from.
/// `None` marks an undefined (warm-up) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(kind: IndicatorKind, values: Vec<Option<f64>>) -> Self {
        Self { kind, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn label(&self) -> String {
        self.kind.label()
    }

    pub fn latest(&self) -> SignalResult<f64> {
        latest(&self.values)
    }

    pub fn latest_pair(&self) -> SignalResult<(f64, f64)> {
        latest_pair(&self.values)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdParams {
    pub const DEFAULT_SIGNAL: usize = 9;

    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    pub fn with_default_signal(fast: usize, slow: usize) -> Self {
        Self::new(fast, slow, Self::DEFAULT_SIGNAL)
    }

    pub fn validate(&self) -> SignalResult<()> {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return Err(SignalError::InvalidParameter(format!(
                "MACD periods must be positive, got {}/{}/{}",
                self.fast, self.slow, self.signal
            )));
        }
        Ok(())
    }

    pub fn label(&self) -> String {
        format!("MACD_{}_{}_{}", self.fast, self.slow, self.signal)
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self::new(12, 26, Self::DEFAULT_SIGNAL)
    }
}

/// MACD line, signal line and histogram, all aligned with the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub params: MacdParams,
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    pub fn label(&self) -> String {
        self.params.label()
    }

    pub fn signal_label(&self) -> String {
        format!("MACDs_{}_{}_{}", self.params.fast, self.params.slow, self.params.signal)
    }

    pub fn histogram_label(&self) -> String {
        format!("MACDh_{}_{}_{}", self.params.fast, self.params.slow, self.params.signal)
    }
}

pub(crate) fn latest(values: &[Option<f64>]) -> SignalResult<f64> {
    values
        .last()
        .copied()
        .flatten()
        .ok_or(SignalError::InsufficientHistory {
            required: 1,
            available: 0,
        })
}

/// The values at `t-1` and `t`; both must be defined.
pub(crate) fn latest_pair(values: &[Option<f64>]) -> SignalResult<(f64, f64)> {
    let n = values.len();
    let tail = if n >= 2 { &values[n - 2..] } else { values };
    match tail {
        [Some(prev), Some(last)] => Ok((*prev, *last)),
        _ => Err(SignalError::InsufficientHistory {
            required: 2,
            available: tail.iter().filter(|v| v.is_some()).count(),
        }),
    }
}
