//! Unit tests for EMA indicator

use crate::test_utils::{linear, series_from_closes};
use stockpicker::indicators::trend::{calculate_ema, calculate_emas};

#[test]
fn test_ema_insufficient_data() {
    let series = series_from_closes("TEST", &linear(100.0, 0.1, 10));
    let ema = calculate_ema(&series, 20).unwrap();
    assert_eq!(ema.len(), 10);
    assert_eq!(ema.defined_count(), 0);
}

#[test]
fn test_ema_seeded_with_sma() {
    let series = series_from_closes("TEST", &[2.0, 4.0, 6.0, 8.0]);
    let ema = calculate_ema(&series, 3).unwrap();
    assert_eq!(ema.values[..2], [None, None]);
    assert_eq!(ema.values[2], Some(4.0));
    // alpha = 0.5
    assert_eq!(ema.values[3], Some(6.0));
}

#[test]
fn test_ema_of_constant_series_is_constant() {
    let series = series_from_closes("TEST", &[42.0; 30]);
    let ema = calculate_ema(&series, 12).unwrap();
    assert!(ema.values[11..]
        .iter()
        .all(|v| (v.unwrap() - 42.0).abs() < 1e-9));
}

#[test]
fn test_calculate_multiple_emas() {
    let series = series_from_closes("TEST", &linear(100.0, 0.1, 250));
    let emas = calculate_emas(&series, &[12, 26, 50, 200]).unwrap();
    assert_eq!(emas.len(), 4);
    assert_eq!(emas[3].label(), "EMA_200");
    assert!(calculate_emas(&series, &[12, 0]).is_err());
}
