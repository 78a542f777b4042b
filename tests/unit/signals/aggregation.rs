//! Unit tests for horizon bucketing and intersection

use crate::test_utils::start_date;
use stockpicker::models::signal::{Classification, Evaluation, Horizon, SignalRecord};
use stockpicker::signals::aggregation::Aggregator;

fn evaluation(symbol: &str, horizon: Horizon, classification: Classification) -> Evaluation {
    Evaluation::new(SignalRecord::new(
        symbol,
        horizon,
        classification,
        start_date(),
        100.0,
    ))
}

#[test]
fn test_intersection_of_short_and_medium_buys() {
    let mut aggregator = Aggregator::new();
    for (symbol, short, medium) in [
        ("A", Classification::Buy, Classification::DontBuy),
        ("B", Classification::Buy, Classification::Buy),
        ("C", Classification::DontBuy, Classification::Buy),
    ] {
        aggregator.record(evaluation(symbol, Horizon::Short, short));
        aggregator.record(evaluation(symbol, Horizon::Medium, medium));
        aggregator.record(evaluation(symbol, Horizon::Long, Classification::DontBuy));
    }

    let report = aggregator.finish();
    assert_eq!(report.buys.symbols(Horizon::Short), vec!["A", "B"]);
    assert_eq!(report.buys.symbols(Horizon::Medium), vec!["B", "C"]);
    assert!(report.buys.get(Horizon::Long).is_empty());
    assert_eq!(report.intersection, vec!["B".to_string()]);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_long_horizon_buys_do_not_count_for_intersection() {
    let mut aggregator = Aggregator::new();
    aggregator.record(evaluation("A", Horizon::Short, Classification::Buy));
    aggregator.record(evaluation("A", Horizon::Long, Classification::Buy));
    assert!(aggregator.intersection().is_empty());
    assert_eq!(aggregator.buckets().symbols(Horizon::Long), vec!["A"]);
}

#[test]
fn test_sell_overlays_collected_for_short_horizon() {
    let mut aggregator = Aggregator::new();
    aggregator.record(evaluation("HOT", Horizon::Short, Classification::DontBuy).with_sell_overlay());
    aggregator.record(evaluation("COLD", Horizon::Short, Classification::Buy));

    let report = aggregator.finish();
    assert_eq!(report.sells.len(), 1);
    assert_eq!(report.sells[0].symbol(), "HOT");
    assert_eq!(report.sells[0].classification(), Classification::Sell);
    // the DON'T BUY itself is not bucketed
    assert!(!report.buys.contains(Horizon::Short, "HOT"));
}

#[test]
fn test_indeterminate_records_are_reported() {
    let mut aggregator = Aggregator::new();
    aggregator.record(evaluation("NEW", Horizon::Long, Classification::Indeterminate));

    let report = aggregator.finish();
    assert_eq!(report.indeterminate.len(), 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].symbol, "NEW");
    assert!(report.diagnostics[0].message.contains("6mo"));
}

#[test]
fn test_skipped_symbol_yields_diagnostic_only() {
    let mut aggregator = Aggregator::new();
    aggregator.skip("ZZZZ", "no data available");
    aggregator.record(evaluation("AAPL", Horizon::Short, Classification::Buy));

    let report = aggregator.finish();
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].symbol, "ZZZZ");
    for horizon in Horizon::ALL {
        assert!(!report.buys.contains(horizon, "ZZZZ"));
    }
    assert_eq!(report.buys.symbols(Horizon::Short), vec!["AAPL"]);
}

#[test]
fn test_report_serializes_horizon_labels() {
    let mut aggregator = Aggregator::new();
    aggregator.record(evaluation("AAPL", Horizon::Medium, Classification::Buy));
    let json = serde_json::to_value(aggregator.finish()).unwrap();

    assert_eq!(json["buys"]["3mo"][0]["symbol"], "AAPL");
    assert_eq!(json["buys"]["3mo"][0]["classification"], "BUY");
    assert_eq!(json["buys"]["1mo"].as_array().unwrap().len(), 0);
}
