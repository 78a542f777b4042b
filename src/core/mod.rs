//! Core application primitives (pipeline runner, HTTP surface)

pub mod http;
pub mod runner;

pub use http::*;
pub use runner::*;
