use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookback horizon. Ordered shortest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1mo")]
    Short,
    #[serde(rename = "3mo")]
    Medium,
    #[serde(rename = "6mo")]
    Long,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "1mo",
            Self::Medium => "3mo",
            Self::Long => "6mo",
        }
    }

    /// SELL overlays are only evaluated on the shortest horizon.
    pub fn is_shortest(&self) -> bool {
        matches!(self, Self::Short)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Buy,
    DontBuy,
    Sell,
    Indeterminate,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Buy => "BUY",
            Self::DontBuy => "DON'T BUY",
            Self::Sell => "SELL",
            Self::Indeterminate => "INDETERMINATE",
        };
        f.write_str(text)
    }
}

/// One classification of the latest observation for a (symbol, horizon) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    symbol: String,
    horizon: Horizon,
    classification: Classification,
    observation_date: NaiveDate,
    closing_price: f64,
}

impl SignalRecord {
    pub fn new(
        symbol: impl Into<String>,
        horizon: Horizon,
        classification: Classification,
        observation_date: NaiveDate,
        closing_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            horizon,
            classification,
            observation_date,
            closing_price,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn observation_date(&self) -> NaiveDate {
        self.observation_date
    }

    pub fn closing_price(&self) -> f64 {
        self.closing_price
    }

    /// Same observation, different classification.
    pub(crate) fn reclassified(&self, classification: Classification) -> Self {
        Self {
            classification,
            ..self.clone()
        }
    }
}

/// Output of a latest-point evaluation: the horizon's classification plus an
/// optional SELL record reported alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub record: SignalRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_overlay: Option<SignalRecord>,
}

impl Evaluation {
    pub fn new(record: SignalRecord) -> Self {
        Self {
            record,
            sell_overlay: None,
        }
    }

    pub fn with_sell_overlay(mut self) -> Self {
        self.sell_overlay = Some(self.record.reclassified(Classification::Sell));
        self
    }

    pub fn classification(&self) -> Classification {
        self.record.classification()
    }
}
