//! Technical-analysis buy/sell signals for stock tickers over short, medium
//! and long horizons.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{SignalError, SignalResult};
