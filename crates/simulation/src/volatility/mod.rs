//! Volatility estimation with an ordered fallback chain.
//!
//! Each tier is a [`VolatilityTier`]. The [`VolatilityEstimator`] tries the
//! tiers strictly in sequence, stops at the first success and otherwise
//! falls back to the static [`AssetClassification`].

mod classification;
mod historical;

pub use classification::AssetClassification;
pub use historical::HistoricalWindow;

use crate::config::SimulationConfig;
use crate::error::EstimationError;
use async_trait::async_trait;
use lp_sim_data::PriceFeed;
use lp_sim_domain::entities::{TokenCatalog, TokenId};
use lp_sim_domain::value_objects::VolatilityResult;
use tracing::{debug, info, warn};

/// One tier of the estimation chain.
#[async_trait]
pub trait VolatilityTier: Send + Sync {
    /// Attempts an estimate for `token`.
    async fn estimate(
        &self,
        feed: &dyn PriceFeed,
        token: &TokenId,
    ) -> Result<VolatilityResult, EstimationError>;

    /// Returns the tier name for logging.
    fn name(&self) -> String;
}

/// Chain of volatility tiers with a static last resort.
pub struct VolatilityEstimator {
    tiers: Vec<Box<dyn VolatilityTier>>,
    fallback: AssetClassification,
}

impl VolatilityEstimator {
    /// Creates an estimator from explicit tiers.
    #[must_use]
    pub fn new(tiers: Vec<Box<dyn VolatilityTier>>, fallback: AssetClassification) -> Self {
        Self { tiers, fallback }
    }

    /// One [`HistoricalWindow`] per configured window, in order.
    #[must_use]
    pub fn from_config(config: &SimulationConfig, catalog: TokenCatalog) -> Self {
        let tiers = config
            .history_windows
            .iter()
            .map(|days| {
                Box::new(HistoricalWindow::new(*days, config.min_history_points))
                    as Box<dyn VolatilityTier>
            })
            .collect();
        Self::new(tiers, AssetClassification::new(catalog))
    }

    /// Number of fallible tiers before the static fallback.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Estimates volatility for `token`. Never fails.
    pub async fn estimate<F: PriceFeed>(&self, feed: &F, token: &TokenId) -> VolatilityResult {
        for tier in &self.tiers {
            match tier.estimate(feed, token).await {
                Ok(result) => {
                    info!(
                        token = %token,
                        tier = %tier.name(),
                        volatility_pct = result.value_pct,
                        "Volatility estimated"
                    );
                    return result;
                }
                Err(err) => {
                    debug!(token = %token, tier = %tier.name(), error = %err, "Volatility tier failed");
                }
            }
        }

        let result = self.fallback.classify(token);
        warn!(
            token = %token,
            volatility_pct = result.value_pct,
            "No usable history, using static volatility estimate"
        );
        result
    }
}
