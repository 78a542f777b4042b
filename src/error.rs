//! Error taxonomy shared by the indicator, evaluation and fetch layers.
//!
//! None of these errors is fatal to a session: the runner turns every one of
//! them into a per-symbol diagnostic and moves on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// Empty, missing, failed or timed-out price history for a symbol.
    #[error("no data available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Fewer defined indicator values than a rule needs.
    #[error("insufficient history: need {required} defined values, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed price series: {0}")]
    MalformedSeries(String),
}

impl SignalError {
    pub fn data_unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

pub type SignalResult<T> = Result<T, SignalError>;
