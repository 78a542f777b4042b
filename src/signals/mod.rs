//! Signal evaluation: latest-point horizon classification, per-bar chart
//! markers and cross-symbol aggregation.

pub mod aggregation;
pub mod chart;
pub mod crossover;
pub mod evaluator;
pub mod horizons;

pub use aggregation::*;
pub use chart::*;
pub use crossover::*;
pub use evaluator::*;
pub use horizons::{HorizonParams, HORIZON_FETCH_PERIOD};
