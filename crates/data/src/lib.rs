//! Market data access for the position simulator.
//!
//! This crate provides:
//! - The [`PriceFeed`] trait consumed by the simulation engine
//! - A CoinGecko HTTP implementation
//! - An in-memory fixture implementation for tests and offline runs

/// Prelude module for convenient imports.
pub mod prelude;

/// Provider configuration.
pub mod config;
/// Error types.
pub mod error;
/// Price feed implementations.
pub mod providers;

pub use error::PriceFeedError;

use async_trait::async_trait;
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::value_objects::PriceSeries;
use std::sync::Arc;

/// Source of spot prices and daily price history.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Current USD price of `token`.
    async fn fetch_spot_price(&self, token: &TokenId) -> Result<f64, PriceFeedError>;

    /// Daily USD prices of `token` over the last `days` days, oldest first.
    async fn fetch_daily_history(
        &self,
        token: &TokenId,
        days: u32,
    ) -> Result<PriceSeries, PriceFeedError>;
}

#[async_trait]
impl<T: PriceFeed + ?Sized> PriceFeed for Arc<T> {
    async fn fetch_spot_price(&self, token: &TokenId) -> Result<f64, PriceFeedError> {
        (**self).fetch_spot_price(token).await
    }

    async fn fetch_daily_history(
        &self,
        token: &TokenId,
        days: u32,
    ) -> Result<PriceSeries, PriceFeedError> {
        (**self).fetch_daily_history(token, days).await
    }
}
