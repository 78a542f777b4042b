//! External collaborators: market data providers.

pub mod market_data;
pub mod yahoo;

pub use market_data::{FetchRange, InMemoryMarketDataProvider, MarketDataProvider};
pub use yahoo::YahooMarketDataProvider;
