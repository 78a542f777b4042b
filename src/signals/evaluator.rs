//! Latest-point classification of indicator series for one horizon.

use tracing::debug;

use crate::config::Method;
use crate::error::{SignalError, SignalResult};
use crate::indicators::IndicatorOutput;
use crate::models::indicators::{latest_pair, IndicatorSeries, MacdSeries};
use crate::models::price::PriceSeries;
use crate::models::signal::{Classification, Evaluation, Horizon, SignalRecord};
use crate::signals::crossover::{crossover_between, CrossoverType};
use crate::signals::horizons::HorizonParams;

/// RSI level above which a short-horizon DON'T BUY also reports a SELL.
pub const RSI_OVERBOUGHT: f64 = 80.0;

/// Classify the latest RSI value: BUY when strictly below `buy_threshold`.
pub fn evaluate_rsi(
    series: &PriceSeries,
    rsi: &IndicatorSeries,
    horizon: Horizon,
    buy_threshold: f64,
) -> SignalResult<Evaluation> {
    validate_threshold(buy_threshold)?;
    let base = base_record(series, rsi.len(), horizon)?;

    let value = match rsi.latest() {
        Ok(value) => value,
        Err(e) => return Ok(indeterminate(base, &rsi.label(), e)),
    };

    if value < buy_threshold {
        return Ok(Evaluation::new(base.reclassified(Classification::Buy)));
    }

    let evaluation = Evaluation::new(base.reclassified(Classification::DontBuy));
    if horizon.is_shortest() && value > RSI_OVERBOUGHT {
        Ok(evaluation.with_sell_overlay())
    } else {
        Ok(evaluation)
    }
}

/// Classify the last two MACD samples: BUY on an upward crossing of the signal
/// line between `t-1` and `t`.
pub fn evaluate_macd(
    series: &PriceSeries,
    macd: &MacdSeries,
    horizon: Horizon,
) -> SignalResult<Evaluation> {
    let base = base_record(series, macd.len(), horizon)?;

    let pairs = latest_pair(&macd.macd)
        .and_then(|line| latest_pair(&macd.signal).map(|signal| (line, signal)));
    let ((prev_line, line), (prev_signal, signal)) = match pairs {
        Ok(pairs) => pairs,
        Err(e) => return Ok(indeterminate(base, &macd.label(), e)),
    };

    if crossover_between(prev_line, prev_signal, line, signal) == CrossoverType::Bullish {
        return Ok(Evaluation::new(base.reclassified(Classification::Buy)));
    }

    let evaluation = Evaluation::new(base.reclassified(Classification::DontBuy));
    if horizon.is_shortest() && line < signal {
        Ok(evaluation.with_sell_overlay())
    } else {
        Ok(evaluation)
    }
}

/// Horizon-mode evaluator for one analysis method.
#[derive(Debug, Clone, Copy)]
pub struct SignalEvaluator {
    method: Method,
    buy_threshold: f64,
}

impl SignalEvaluator {
    pub fn new(method: Method, buy_threshold: f64) -> SignalResult<Self> {
        validate_threshold(buy_threshold)?;
        // rejects chart-only methods up front
        HorizonParams::for_horizon(Horizon::Short).indicator(method)?;
        Ok(Self {
            method,
            buy_threshold,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn evaluate(&self, series: &PriceSeries, horizon: Horizon) -> SignalResult<Evaluation> {
        let spec = HorizonParams::for_horizon(horizon).indicator(self.method)?;
        match spec.compute(series)? {
            IndicatorOutput::Line(rsi) => evaluate_rsi(series, &rsi, horizon, self.buy_threshold),
            IndicatorOutput::Macd(macd) => evaluate_macd(series, &macd, horizon),
        }
    }

    /// One evaluation per horizon, shortest first.
    pub fn evaluate_all(&self, series: &PriceSeries) -> SignalResult<Vec<Evaluation>> {
        Horizon::ALL
            .iter()
            .map(|&horizon| self.evaluate(series, horizon))
            .collect()
    }
}

fn validate_threshold(threshold: f64) -> SignalResult<()> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(SignalError::InvalidParameter(format!(
            "RSI threshold must be within [0, 100], got {}",
            threshold
        )));
    }
    Ok(())
}

/// Record for the latest bar, classified as indeterminate until a rule decides.
fn base_record(series: &PriceSeries, indicator_len: usize, horizon: Horizon) -> SignalResult<SignalRecord> {
    let last = series
        .last()
        .ok_or_else(|| SignalError::data_unavailable(series.symbol(), "empty price series"))?;
    if indicator_len != series.len() {
        return Err(SignalError::MalformedSeries(format!(
            "{}: indicator has {} values for {} bars",
            series.symbol(),
            indicator_len,
            series.len()
        )));
    }
    Ok(SignalRecord::new(
        series.symbol(),
        horizon,
        Classification::Indeterminate,
        last.date,
        last.close,
    ))
}

fn indeterminate(base: SignalRecord, label: &str, cause: SignalError) -> Evaluation {
    debug!(
        symbol = %base.symbol(),
        horizon = %base.horizon(),
        indicator = %label,
        reason = %cause,
        "Evaluator: {} undefined at the latest bars",
        label
    );
    Evaluation::new(base)
}
