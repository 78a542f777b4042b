//! One-shot analysis run driven by environment configuration.
//!
//! `SYMBOLS="AAPL MSFT" METHOD=rsi cargo run --bin stockpicker`

use dotenvy::dotenv;
use std::sync::Arc;
use stockpicker::config::{AnalysisConfig, AppConfig, Method};
use stockpicker::core::runner::{AnalysisRunner, ChartReport};
use stockpicker::logging;
use stockpicker::models::signal::{Horizon, SignalRecord};
use stockpicker::services::yahoo::YahooMarketDataProvider;
use stockpicker::signals::aggregation::{AnalysisReport, Diagnostic};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let app_config = AppConfig::from_env();
    let config = AnalysisConfig::from_env()?;
    info!(method = ?config.method, symbols = %config.symbols, "Starting analysis");

    let provider = Arc::new(YahooMarketDataProvider::with_base_url(&app_config.yahoo_base_url));
    let runner = AnalysisRunner::new(provider).with_fetch_timeout(app_config.fetch_timeout);

    if config.method == Method::MovingAverageCrossover {
        print_charts(&runner.chart(&config).await?);
        return Ok(());
    }

    let report = runner
        .run_concurrent(&config, app_config.fetch_concurrency)
        .await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("1-Month Sell Indicators:");
    print_records(&report.sells);
    println!();

    if report.intersection.is_empty() {
        println!("No Symbols Found in Both 1-Month and 3-Month Categories");
    } else {
        println!("Symbols Appearing in Both 1-Month and 3-Month Categories:");
        println!("  {}", report.intersection.join(", "));
    }
    println!();

    println!("1, 3, and 6 Month Buy Indicators:");
    for horizon in Horizon::ALL {
        println!("{} Horizon:", horizon);
        print_records(report.buys.get(horizon));
    }
    print_diagnostics(&report.diagnostics);
}

fn print_records(records: &[SignalRecord]) {
    if records.is_empty() {
        println!("  (none)");
    }
    for record in records {
        println!(
            "  {:<8} {}  {}  close ${:.2}",
            record.symbol(),
            record.classification(),
            record.observation_date(),
            record.closing_price()
        );
    }
}

fn print_charts(report: &ChartReport) {
    for chart in &report.charts {
        println!("Displaying data for {} ({} bars)", chart.symbol, chart.points.len());
        for point in chart.points.iter().filter(|p| p.buy.is_some() || p.sell.is_some()) {
            let side = if point.buy.is_some() { "BUY" } else { "SELL" };
            println!("  {}  {:<4}  close ${:.2}", point.date, side, point.close);
        }
    }
    print_diagnostics(&report.diagnostics);
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!();
    println!("Diagnostics:");
    for diagnostic in diagnostics {
        println!("  {}: {}", diagnostic.symbol, diagnostic.message);
    }
}
