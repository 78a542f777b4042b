//! Chart mode: per-bar buy/sell markers over a date range, plus the optional
//! 50/200-day moving-average overlays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, Method};
use crate::error::SignalResult;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::trend::{calculate_sma, LONG_OVERLAY, SHORT_OVERLAY};
use crate::models::indicators::MacdParams;
use crate::models::price::PriceSeries;
use crate::signals::crossover::{
    detect_crossovers, threshold_signals, zero_line_crossovers, SignalMarkers,
};

/// RSI window used for chart markers.
pub const CHART_RSI_LENGTH: usize = 14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    /// Closing price where a buy marker is drawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub symbol: String,
    pub method: Method,
    pub points: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma50: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma200: Option<Vec<Option<f64>>>,
}

impl ChartData {
    pub fn buy_dates(&self) -> Vec<NaiveDate> {
        self.points.iter().filter(|p| p.buy.is_some()).map(|p| p.date).collect()
    }

    pub fn sell_dates(&self) -> Vec<NaiveDate> {
        self.points.iter().filter(|p| p.sell.is_some()).map(|p| p.date).collect()
    }
}

/// Markers for `method` over the whole series.
pub fn chart_markers(series: &PriceSeries, config: &AnalysisConfig) -> SignalResult<SignalMarkers> {
    Ok(match config.method {
        Method::MovingAverageCrossover => {
            let fast = calculate_sma(series, SHORT_OVERLAY)?;
            let slow = calculate_sma(series, LONG_OVERLAY)?;
            detect_crossovers(&fast.values, &slow.values)
        }
        Method::Rsi => {
            let rsi = calculate_rsi(series, CHART_RSI_LENGTH)?;
            threshold_signals(
                &rsi.values,
                f64::from(config.buy_threshold),
                f64::from(config.sell_threshold),
            )
        }
        Method::Macd => {
            let macd = calculate_macd(series, MacdParams::default())?;
            zero_line_crossovers(&macd.macd)
        }
    })
}

pub fn build_chart(series: &PriceSeries, config: &AnalysisConfig) -> SignalResult<ChartData> {
    let markers = chart_markers(series, config)?;

    let points = series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| ChartPoint {
            date: bar.date,
            close: bar.close,
            volume: bar.volume,
            buy: markers.buy[i].then_some(bar.close),
            sell: markers.sell[i].then_some(bar.close),
        })
        .collect();

    let ma50 = if config.show_50ma {
        Some(calculate_sma(series, SHORT_OVERLAY)?.values)
    } else {
        None
    };
    let ma200 = if config.show_200ma {
        Some(calculate_sma(series, LONG_OVERLAY)?.values)
    } else {
        None
    };

    Ok(ChartData {
        symbol: series.symbol().to_string(),
        method: config.method,
        points,
        ma50,
        ma200,
    })
}
