//! Unit tests for MACD indicator

use crate::test_utils::{series_from_closes, wave};
use stockpicker::error::SignalError;
use stockpicker::indicators::momentum::{calculate_macd, calculate_macd_default};
use stockpicker::indicators::trend::calculate_ema;
use stockpicker::indicators::{IndicatorOutput, IndicatorSpec};
use stockpicker::models::indicators::MacdParams;

#[test]
fn test_macd_line_is_ema_difference() {
    let series = series_from_closes("TEST", &wave(120));
    let params = MacdParams::new(8, 17, 9);
    let macd = calculate_macd(&series, params).unwrap();
    let fast = calculate_ema(&series, 8).unwrap();
    let slow = calculate_ema(&series, 17).unwrap();

    assert_eq!(macd.len(), series.len());
    for i in 0..series.len() {
        match (fast.values[i], slow.values[i]) {
            (Some(f), Some(s)) => {
                let line = macd.macd[i].expect("line defined where both EMAs are");
                assert!((line - (f - s)).abs() < 1e-9);
            }
            _ => assert!(macd.macd[i].is_none()),
        }
    }
}

#[test]
fn test_macd_warmup_lengths() {
    let series = series_from_closes("TEST", &wave(80));
    let macd = calculate_macd_default(&series).unwrap();

    // line from slow - 1, signal another signal - 1 bars later
    assert!(macd.macd[24].is_none());
    assert!(macd.macd[25].is_some());
    assert!(macd.signal[32].is_none());
    assert!(macd.signal[33].is_some());
    assert!(macd.histogram[32].is_none());

    for i in 33..series.len() {
        let expected = macd.macd[i].unwrap() - macd.signal[i].unwrap();
        assert!((macd.histogram[i].unwrap() - expected).abs() < 1e-12);
    }
}

#[test]
fn test_macd_labels_keep_configurations_apart() {
    let series = series_from_closes("TEST", &wave(80));
    let short = calculate_macd(&series, MacdParams::with_default_signal(8, 17)).unwrap();
    let medium = calculate_macd(&series, MacdParams::with_default_signal(12, 26)).unwrap();

    assert_eq!(short.label(), "MACD_8_17_9");
    assert_eq!(short.signal_label(), "MACDs_8_17_9");
    assert_eq!(short.histogram_label(), "MACDh_8_17_9");
    assert_eq!(medium.label(), "MACD_12_26_9");
    assert_ne!(short.macd, medium.macd);
}

#[test]
fn test_macd_swaps_inverted_periods() {
    let series = series_from_closes("TEST", &wave(80));
    let inverted = calculate_macd(&series, MacdParams::new(26, 12, 9)).unwrap();
    let normal = calculate_macd(&series, MacdParams::new(12, 26, 9)).unwrap();
    assert_eq!(inverted, normal);
}

#[test]
fn test_macd_short_history_is_undefined() {
    let series = series_from_closes("TEST", &wave(20));
    let macd = calculate_macd_default(&series).unwrap();
    assert!(macd.macd.iter().all(Option::is_none));
    assert!(macd.signal.iter().all(Option::is_none));
}

#[test]
fn test_macd_rejects_zero_period() {
    let series = series_from_closes("TEST", &wave(40));
    assert!(matches!(
        calculate_macd(&series, MacdParams::new(0, 26, 9)),
        Err(SignalError::InvalidParameter(_))
    ));
}

#[test]
fn test_spec_dispatch() {
    let series = series_from_closes("TEST", &wave(80));
    match IndicatorSpec::macd(12, 26).compute(&series).unwrap() {
        IndicatorOutput::Macd(macd) => assert_eq!(macd.params, MacdParams::default()),
        other => panic!("expected MACD output, got {}", other.label()),
    }
    let sma = IndicatorSpec::Sma { length: 5 }.compute(&series).unwrap();
    assert_eq!(sma.label(), "SMA_5");
    assert_eq!(sma.len(), 80);
}
