//! Per-bar crossover and threshold detection for chart markers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    Bullish,
    Bearish,
    None,
}

/// Classify the move between two consecutive samples of a fast and a slow line.
///
/// Bullish when fast goes from strictly below to strictly above slow, bearish
/// for the mirror. Touching without crossing is `None`.
pub fn crossover_between(prev_fast: f64, prev_slow: f64, fast: f64, slow: f64) -> CrossoverType {
    if fast > slow && prev_fast < prev_slow {
        CrossoverType::Bullish
    } else if fast < slow && prev_fast > prev_slow {
        CrossoverType::Bearish
    } else {
        CrossoverType::None
    }
}

/// Time-indexed buy/sell flags, one per bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalMarkers {
    pub buy: Vec<bool>,
    pub sell: Vec<bool>,
}

impl SignalMarkers {
    fn with_len(len: usize) -> Self {
        Self {
            buy: vec![false; len],
            sell: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.buy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty()
    }

    pub fn buy_count(&self) -> usize {
        self.buy.iter().filter(|&&b| b).count()
    }

    pub fn sell_count(&self) -> usize {
        self.sell.iter().filter(|&&s| s).count()
    }
}

/// Flag every bar where `fast` crosses `slow`. Bars touching an undefined value
/// (and bar 0) are never flagged.
pub fn detect_crossovers(fast: &[Option<f64>], slow: &[Option<f64>]) -> SignalMarkers {
    let len = fast.len().min(slow.len());
    let mut markers = SignalMarkers::with_len(len);

    for t in 1..len {
        if let (Some(pf), Some(ps), Some(f), Some(s)) = (fast[t - 1], slow[t - 1], fast[t], slow[t]) {
            match crossover_between(pf, ps, f, s) {
                CrossoverType::Bullish => markers.buy[t] = true,
                CrossoverType::Bearish => markers.sell[t] = true,
                CrossoverType::None => {}
            }
        }
    }
    markers
}

/// Crossings of `values` through zero.
pub fn zero_line_crossovers(values: &[Option<f64>]) -> SignalMarkers {
    let zero = vec![Some(0.0); values.len()];
    detect_crossovers(values, &zero)
}

/// Buy where the value is strictly below `buy_below`, sell where strictly above
/// `sell_above`. Undefined values produce neither.
pub fn threshold_signals(values: &[Option<f64>], buy_below: f64, sell_above: f64) -> SignalMarkers {
    let mut markers = SignalMarkers::with_len(values.len());
    for (t, value) in values.iter().enumerate() {
        if let Some(v) = value {
            markers.buy[t] = *v < buy_below;
            markers.sell[t] = *v > sell_above;
        }
    }
    markers
}
