//! Prelude module for convenient imports.
//!
//! ```rust
//! use lp_sim_data::prelude::*;
//! ```

pub use crate::PriceFeed;
pub use crate::config::CoinGeckoConfig;
pub use crate::error::PriceFeedError;
pub use crate::providers::{CoinGeckoProvider, FixturePriceFeed};
