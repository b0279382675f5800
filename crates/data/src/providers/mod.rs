//! Price feed implementations.

mod coingecko;
mod fixture;

pub use coingecko::CoinGeckoProvider;
pub use fixture::FixturePriceFeed;
