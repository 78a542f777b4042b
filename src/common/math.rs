//! Series helpers shared by the indicator calculations.
//!
//! Every function returns a vector the same length as its input, with `None`
//! wherever the value is not yet defined.

/// Rolling simple moving average. The first `period - 1` entries are undefined,
/// as is any window containing an undefined input.
pub fn sma_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    for end in period - 1..values.len() {
        let window = &values[end + 1 - period..=end];
        let sum: Option<f64> = window.iter().copied().sum();
        out[end] = sum.map(|s| s / period as f64);
    }
    out
}

/// Exponential moving average seeded with the SMA of the first `period`
/// defined values, `alpha = 2 / (period + 1)`.
///
/// Leading undefined inputs are skipped, so the EMA of a warm-up series (e.g. a
/// MACD line) starts from its first defined value.
pub fn ema_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    let Some(start) = values.iter().position(Option::is_some) else {
        return out;
    };
    let seed_end = start + period - 1;
    if seed_end >= values.len() {
        return out;
    }

    let seed: Option<f64> = values[start..=seed_end].iter().copied().sum();
    let Some(seed) = seed else {
        return out;
    };
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = seed / period as f64;
    out[seed_end] = Some(prev);

    for i in seed_end + 1..values.len() {
        match values[i] {
            Some(value) => {
                prev = ema_from_previous(value, prev, alpha);
                out[i] = Some(prev);
            }
            None => break,
        }
    }
    out
}

pub fn ema_from_previous(value: f64, previous: f64, alpha: f64) -> f64 {
    alpha * value + (1.0 - alpha) * previous
}

/// Element-wise `a - b`, defined where both sides are.
pub fn difference(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect()
}

pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}
