//! Realized volatility over a daily history window.

use super::VolatilityTier;
use crate::config::MIN_HISTORY_POINTS;
use crate::error::EstimationError;
use async_trait::async_trait;
use lp_sim_data::PriceFeed;
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::math::statistics::annualized_volatility_pct;
use lp_sim_domain::value_objects::VolatilityResult;

/// Annualized standard deviation of daily log returns over `window_days`.
///
/// Windows returning fewer than `min_points` prices are rejected even when
/// a value could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalWindow {
    /// Lookback in days.
    pub window_days: u32,
    /// Minimum number of prices, at least [`MIN_HISTORY_POINTS`].
    pub min_points: usize,
}

impl HistoricalWindow {
    /// Creates a window tier.
    #[must_use]
    pub fn new(window_days: u32, min_points: usize) -> Self {
        Self {
            window_days,
            min_points: min_points.max(MIN_HISTORY_POINTS),
        }
    }
}

#[async_trait]
impl VolatilityTier for HistoricalWindow {
    async fn estimate(
        &self,
        feed: &dyn PriceFeed,
        token: &TokenId,
    ) -> Result<VolatilityResult, EstimationError> {
        let series = feed.fetch_daily_history(token, self.window_days).await?;
        if series.len() < self.min_points {
            return Err(EstimationError::InsufficientHistory {
                window_days: self.window_days,
                points: series.len(),
                required: self.min_points,
            });
        }

        let prices: Vec<f64> = series.prices().collect();
        let value_pct = annualized_volatility_pct(&prices).ok_or(EstimationError::InvalidSeries {
            window_days: self.window_days,
        })?;
        Ok(VolatilityResult::from_history(value_pct, self.window_days))
    }

    fn name(&self) -> String {
        format!("{}d_history", self.window_days)
    }
}
