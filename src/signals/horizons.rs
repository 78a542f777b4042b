//! Per-horizon indicator parameterisations.

use crate::config::Method;
use crate::error::{SignalError, SignalResult};
use crate::indicators::IndicatorSpec;
use crate::models::indicators::MacdParams;
use crate::models::signal::Horizon;

/// History requested for horizon analysis; long enough for every horizon below.
pub const HORIZON_FETCH_PERIOD: &str = "6mo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonParams {
    pub horizon: Horizon,
    pub rsi_length: usize,
    pub macd: MacdParams,
}

pub const SHORT: HorizonParams = HorizonParams {
    horizon: Horizon::Short,
    rsi_length: 10,
    macd: MacdParams {
        fast: 8,
        slow: 17,
        signal: 9,
    },
};

pub const MEDIUM: HorizonParams = HorizonParams {
    horizon: Horizon::Medium,
    rsi_length: 14,
    macd: MacdParams {
        fast: 12,
        slow: 26,
        signal: 9,
    },
};

pub const LONG: HorizonParams = HorizonParams {
    horizon: Horizon::Long,
    rsi_length: 24,
    macd: MacdParams {
        fast: 26,
        slow: 54,
        signal: 9,
    },
};

impl HorizonParams {
    pub fn for_horizon(horizon: Horizon) -> Self {
        match horizon {
            Horizon::Short => SHORT,
            Horizon::Medium => MEDIUM,
            Horizon::Long => LONG,
        }
    }

    /// Indicator to compute for `method` on this horizon.
    pub fn indicator(&self, method: Method) -> SignalResult<IndicatorSpec> {
        match method {
            Method::Rsi => Ok(IndicatorSpec::Rsi {
                length: self.rsi_length,
            }),
            Method::Macd => Ok(IndicatorSpec::Macd(self.macd)),
            Method::MovingAverageCrossover => Err(SignalError::InvalidParameter(
                "horizon analysis supports RSI and MACD; moving-average crossover is chart-only"
                    .to_string(),
            )),
        }
    }
}
