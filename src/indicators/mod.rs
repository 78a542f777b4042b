//! Indicator engine: pure functions from a price series to aligned indicator series.

pub mod registry;

pub mod momentum;
pub mod trend;

pub use registry::*;

use crate::error::{SignalError, SignalResult};

pub(crate) fn validate_length(name: &str, length: usize) -> SignalResult<()> {
    if length == 0 {
        return Err(SignalError::InvalidParameter(format!(
            "{} window length must be positive",
            name
        )));
    }
    Ok(())
}
