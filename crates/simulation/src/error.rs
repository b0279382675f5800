//! Simulation error types.

use lp_sim_data::PriceFeedError;
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::error::{InvalidRangeError, LiquidityError};
use thiserror::Error;

/// Fatal failure of a simulation. Returned by the facade instead of panicking.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Structurally invalid input.
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),
    /// The range cannot hold liquidity.
    #[error(transparent)]
    DegenerateLiquidity(#[from] LiquidityError),
    /// No spot price from the feed and none in the fallback table.
    #[error("spot price unavailable for {token}: {source}")]
    PriceFeedUnavailable {
        /// Token that was requested.
        token: TokenId,
        /// Underlying feed failure.
        source: PriceFeedError,
    },
}

impl SimulationError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidRange(err) => err.reason.code(),
            Self::DegenerateLiquidity(_) => "degenerate_liquidity",
            Self::PriceFeedUnavailable { .. } => "price_feed_unavailable",
        }
    }
}

/// Failure of one tier of the volatility fallback chain.
#[derive(Debug, Error)]
pub enum EstimationError {
    /// The window returned too few points to be trusted.
    #[error("{window_days}d window returned {points} points, need {required}")]
    InsufficientHistory {
        /// Window length in days.
        window_days: u32,
        /// Points received.
        points: usize,
        /// Points required.
        required: usize,
    },
    /// The series contained non-positive or non-finite prices.
    #[error("{window_days}d window contains unusable prices")]
    InvalidSeries {
        /// Window length in days.
        window_days: u32,
    },
    /// The feed request failed.
    #[error(transparent)]
    PriceFeed(#[from] PriceFeedError),
}

/// Failure to build or decode a [`crate::record::PositionRecord`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// A figure could not be represented as a decimal.
    #[error("{field} is not a finite number")]
    NonFinite {
        /// Summary field name.
        field: &'static str,
    },
    /// JSON encoding or decoding failed.
    #[error("record serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
