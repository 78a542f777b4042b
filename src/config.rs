//! Environment and per-run analysis configuration.

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{SignalError, SignalResult};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_RSI_BUY_LEVEL: u8 = 25;
pub const DEFAULT_RSI_SELL_LEVEL: u8 = 80;

/// Deployment environment, from `ENVIRONMENT` (defaults to `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// `Ok(None)` when `key` is unset or blank; a value that does not parse is an
/// `InvalidParameter` naming the key.
fn env_parse<T>(key: &str) -> SignalResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|e| {
        SignalError::InvalidParameter(format!("{}={:?} is not valid: {}", key, value, e))
    })
}

/// Process-level settings shared by the binaries.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub yahoo_base_url: String,
    pub fetch_timeout: Duration,
    pub fetch_concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", DEFAULT_PORT),
            yahoo_base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YAHOO_BASE_URL.to_string()),
            fetch_timeout: Duration::from_secs(env_or(
                "FETCH_TIMEOUT_SECONDS",
                DEFAULT_FETCH_TIMEOUT_SECONDS,
            )),
            fetch_concurrency: env_or("FETCH_CONCURRENCY", 1usize).max(1),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            fetch_concurrency: 1,
        }
    }
}

/// Technical-analysis method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Method {
    Rsi,
    Macd,
    MovingAverageCrossover,
}

impl FromStr for Method {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "rsi" => Ok(Self::Rsi),
            "macd" => Ok(Self::Macd),
            "ma" | "moving_average_crossover" | "ma_crossover" => {
                Ok(Self::MovingAverageCrossover)
            }
            other => Err(SignalError::InvalidParameter(format!(
                "unknown method '{}'",
                other
            ))),
        }
    }
}

/// Inputs of one analysis run, as supplied by the presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub method: Method,
    /// Free text, comma and/or space separated.
    pub symbols: String,
    pub buy_threshold: u8,
    pub sell_threshold: u8,
    pub show_50ma: bool,
    pub show_200ma: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let end_date = Utc::now().date_naive();
        let start_date = end_date
            .checked_sub_months(Months::new(24))
            .unwrap_or(end_date);
        Self {
            method: Method::Macd,
            symbols: "AAPL".to_string(),
            buy_threshold: DEFAULT_RSI_BUY_LEVEL,
            sell_threshold: DEFAULT_RSI_SELL_LEVEL,
            show_50ma: false,
            show_200ma: false,
            start_date,
            end_date,
        }
    }
}

impl AnalysisConfig {
    /// Read `SYMBOLS`, `METHOD`, `RSI_BUY_LEVEL`, `RSI_SELL_LEVEL`, `SHOW_50MA`,
    /// `SHOW_200MA`, `START_DATE` and `END_DATE`. Unset variables fall back to
    /// defaults; unparseable ones are rejected.
    pub fn from_env() -> SignalResult<Self> {
        let defaults = Self::default();
        let config = Self {
            method: env_parse("METHOD")?.unwrap_or(defaults.method),
            symbols: env::var("SYMBOLS").unwrap_or(defaults.symbols),
            buy_threshold: env_parse("RSI_BUY_LEVEL")?.unwrap_or(defaults.buy_threshold),
            sell_threshold: env_parse("RSI_SELL_LEVEL")?.unwrap_or(defaults.sell_threshold),
            show_50ma: env_parse("SHOW_50MA")?.unwrap_or(defaults.show_50ma),
            show_200ma: env_parse("SHOW_200MA")?.unwrap_or(defaults.show_200ma),
            start_date: env_parse("START_DATE")?.unwrap_or(defaults.start_date),
            end_date: env_parse("END_DATE")?.unwrap_or(defaults.end_date),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SignalResult<()> {
        for (name, value) in [
            ("buy_threshold", self.buy_threshold),
            ("sell_threshold", self.sell_threshold),
        ] {
            if value > 100 {
                return Err(SignalError::InvalidParameter(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }
        if self.start_date >= self.end_date {
            return Err(SignalError::InvalidParameter(format!(
                "start_date {} must precede end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}
