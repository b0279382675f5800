//! Request generations for interactive sessions.
//!
//! When the selected token changes faster than the feed answers, several
//! estimations are in flight at once. Each one is tagged with a generation
//! and only the latest generation may publish its result.

use crate::volatility::VolatilityEstimator;
use lp_sim_data::PriceFeed;
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::value_objects::VolatilityResult;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Monotonic request counter.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    counter: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request and returns its generation.
    pub fn begin(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently started generation, 0 before the first request.
    pub fn latest(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// True if no request started after `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest() == generation
    }

    /// Passes `value` through only if `generation` is still current.
    pub fn accept<T>(&self, generation: u64, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            debug!(
                generation,
                latest = self.latest(),
                "Dropping stale response"
            );
            None
        }
    }

    /// Runs `future` as a new generation, discarding its output if superseded.
    pub async fn track<T>(&self, future: impl Future<Output = T>) -> Option<T> {
        let generation = self.begin();
        let value = future.await;
        self.accept(generation, value)
    }
}

/// Re-estimates volatility on token changes and keeps the latest result.
pub struct VolatilityRefresher<F> {
    feed: F,
    estimator: VolatilityEstimator,
    generation: RequestGeneration,
    current: RwLock<Option<(TokenId, VolatilityResult)>>,
}

impl<F: PriceFeed> VolatilityRefresher<F> {
    pub fn new(feed: F, estimator: VolatilityEstimator) -> Self {
        Self {
            feed,
            estimator,
            generation: RequestGeneration::new(),
            current: RwLock::new(None),
        }
    }

    /// Estimates `token` and publishes the result unless a later refresh
    /// started meanwhile. Returns the published result.
    pub async fn refresh(&self, token: &TokenId) -> Option<VolatilityResult> {
        let generation = self.generation.begin();
        let result = self.estimator.estimate(&self.feed, token).await;

        let mut current = self.current.write().await;
        let result = self.generation.accept(generation, result)?;
        *current = Some((token.clone(), result.clone()));
        Some(result)
    }

    /// Last published estimate.
    pub async fn current(&self) -> Option<(TokenId, VolatilityResult)> {
        self.current.read().await.clone()
    }
}
