//! Unit tests for RSI indicator

use crate::test_utils::{falling_then_flat, linear, series_from_closes, wave};
use stockpicker::error::SignalError;
use stockpicker::indicators::momentum::{calculate_rsi, calculate_rsi_default};
use stockpicker::models::indicators::IndicatorKind;

#[test]
fn test_rsi_aligned_with_undefined_prefix_and_bounded() {
    let series = series_from_closes("TEST", &wave(60));
    let rsi = calculate_rsi(&series, 14).unwrap();

    assert_eq!(rsi.len(), series.len());
    assert!(rsi.values[..14].iter().all(Option::is_none));
    for value in &rsi.values[14..] {
        let v = value.expect("defined after warm-up");
        assert!((0.0..=100.0).contains(&v), "RSI out of range: {}", v);
    }
}

#[test]
fn test_rsi_insufficient_data_is_all_undefined() {
    let series = series_from_closes("TEST", &wave(14));
    let rsi = calculate_rsi(&series, 14).unwrap();
    assert_eq!(rsi.len(), 14);
    assert_eq!(rsi.defined_count(), 0);

    let series = series_from_closes("TEST", &wave(15));
    let rsi = calculate_rsi(&series, 14).unwrap();
    assert_eq!(rsi.defined_count(), 1);
    assert!(rsi.values[14].is_some());
}

#[test]
fn test_rsi_wilder_smoothing_by_hand() {
    // changes +1, -1, +1
    let series = series_from_closes("TEST", &[1.0, 2.0, 1.0, 2.0]);
    let rsi = calculate_rsi(&series, 2).unwrap();

    assert_eq!(rsi.values[2], Some(50.0));
    // gain (0.5 + 1) / 2 = 0.75, loss (0.5 + 0) / 2 = 0.25
    assert!((rsi.values[3].unwrap() - 75.0).abs() < 1e-9);
}

#[test]
fn test_rsi_falling_then_flat_is_oversold() {
    let series = series_from_closes("TEST", &falling_then_flat(10));
    let rsi = calculate_rsi_default(&series).unwrap();
    assert!(rsi.latest().unwrap() < 25.0);
}

#[test]
fn test_rsi_extremes() {
    let rising = series_from_closes("UP", &linear(100.0, 1.0, 30));
    assert_eq!(calculate_rsi(&rising, 10).unwrap().latest().unwrap(), 100.0);

    let flat = series_from_closes("FLAT", &[50.0; 30]);
    assert_eq!(calculate_rsi(&flat, 10).unwrap().latest().unwrap(), 50.0);
}

#[test]
fn test_rsi_label_embeds_length() {
    let series = series_from_closes("TEST", &wave(30));
    let rsi = calculate_rsi(&series, 10).unwrap();
    assert_eq!(rsi.kind, IndicatorKind::Rsi { length: 10 });
    assert_eq!(rsi.label(), "RSI_10");
}

#[test]
fn test_rsi_rejects_zero_length() {
    let series = series_from_closes("TEST", &wave(30));
    assert!(matches!(
        calculate_rsi(&series, 0),
        Err(SignalError::InvalidParameter(_))
    ));
}
