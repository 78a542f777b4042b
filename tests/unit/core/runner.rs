//! Unit tests for symbol parsing

use stockpicker::core::runner::parse_symbols;

#[test]
fn test_parse_symbols_splits_on_commas_and_spaces() {
    assert_eq!(
        parse_symbols("aapl, msft googl,,TSLA"),
        vec!["AAPL", "MSFT", "GOOGL", "TSLA"]
    );
}

#[test]
fn test_parse_symbols_drops_empties_and_repeats() {
    assert_eq!(parse_symbols("  ,  "), Vec::<String>::new());
    assert_eq!(parse_symbols("aapl AAPL\tmsft"), vec!["AAPL", "MSFT"]);
}
