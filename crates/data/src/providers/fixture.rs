//! In-memory price feed for tests and offline runs.

use crate::PriceFeed;
use crate::error::PriceFeedError;
use async_trait::async_trait;
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::value_objects::PriceSeries;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::Mutex;

/// Price feed serving preloaded spot prices and histories.
///
/// A full history is truncated to the last `days + 1` points per request;
/// exact per-window series can be registered with [`Self::with_window`].
#[derive(Debug, Default)]
pub struct FixturePriceFeed {
    spots: HashMap<TokenId, f64>,
    histories: HashMap<TokenId, PriceSeries>,
    windows: HashMap<(TokenId, u32), PriceSeries>,
    offline: HashSet<TokenId>,
    latency: HashMap<TokenId, Duration>,
    history_requests: Mutex<Vec<(TokenId, u32)>>,
}

impl FixturePriceFeed {
    /// Creates an empty feed. Every request fails with `NotFound`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a spot price.
    #[must_use]
    pub fn with_spot(mut self, token: impl Into<TokenId>, price: f64) -> Self {
        self.spots.insert(token.into(), price);
        self
    }

    /// Registers a full daily history.
    #[must_use]
    pub fn with_history(mut self, token: impl Into<TokenId>, series: PriceSeries) -> Self {
        self.histories.insert(token.into(), series);
        self
    }

    /// Registers the exact series returned for one window.
    #[must_use]
    pub fn with_window(mut self, token: impl Into<TokenId>, days: u32, series: PriceSeries) -> Self {
        self.windows.insert((token.into(), days), series);
        self
    }

    /// Makes every request for `token` fail as if the network were down.
    #[must_use]
    pub fn with_outage(mut self, token: impl Into<TokenId>) -> Self {
        self.offline.insert(token.into());
        self
    }

    /// Delays every response for `token`.
    #[must_use]
    pub fn with_latency(mut self, token: impl Into<TokenId>, delay: Duration) -> Self {
        self.latency.insert(token.into(), delay);
        self
    }

    /// History requests received so far, in order.
    pub async fn history_requests(&self) -> Vec<(TokenId, u32)> {
        self.history_requests.lock().await.clone()
    }

    async fn simulate_network(&self, token: &TokenId) -> Result<(), PriceFeedError> {
        if let Some(delay) = self.latency.get(token) {
            tokio::time::sleep(*delay).await;
        }
        if self.offline.contains(token) {
            return Err(PriceFeedError::Unavailable(format!("{token} feed offline")));
        }
        Ok(())
    }
}

#[async_trait]
impl PriceFeed for FixturePriceFeed {
    async fn fetch_spot_price(&self, token: &TokenId) -> Result<f64, PriceFeedError> {
        self.simulate_network(token).await?;
        self.spots
            .get(token)
            .copied()
            .ok_or_else(|| PriceFeedError::NotFound(token.clone()))
    }

    async fn fetch_daily_history(
        &self,
        token: &TokenId,
        days: u32,
    ) -> Result<PriceSeries, PriceFeedError> {
        self.history_requests
            .lock()
            .await
            .push((token.clone(), days));
        self.simulate_network(token).await?;

        if let Some(series) = self.windows.get(&(token.clone(), days)) {
            return Ok(series.clone());
        }
        let full = self
            .histories
            .get(token)
            .ok_or_else(|| PriceFeedError::NotFound(token.clone()))?;
        let keep = days as usize + 1;
        let skip = full.len().saturating_sub(keep);
        Ok(PriceSeries::from_points(full.points()[skip..].to_vec()))
    }
}
