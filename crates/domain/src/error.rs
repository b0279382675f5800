//! Error types for domain validation and liquidity math.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reason a simulation input was rejected before any computation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Principal is zero or negative.
    NonPositivePrincipal,
    /// Horizon outside `1..=365` days.
    DaysOutOfBounds,
    /// Volatility outside `1..=200` percent.
    VolatilityOutOfBounds,
    /// Expected APR outside `0..=500` percent.
    AprOutOfBounds,
    /// Spot price is zero or negative.
    NonPositiveSpot,
    /// Lower bound is zero or negative.
    NonPositiveLower,
    /// Lower bound is not strictly below the upper bound.
    EmptyRange,
    /// A numeric field is NaN or infinite.
    NonFiniteValue,
}

impl InvalidReason {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositivePrincipal => "non_positive_principal",
            Self::DaysOutOfBounds => "days_out_of_bounds",
            Self::VolatilityOutOfBounds => "volatility_out_of_bounds",
            Self::AprOutOfBounds => "apr_out_of_bounds",
            Self::NonPositiveSpot => "non_positive_spot",
            Self::NonPositiveLower => "non_positive_lower",
            Self::EmptyRange => "empty_range",
            Self::NonFiniteValue => "non_finite_value",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structurally invalid simulation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid range: {reason}")]
pub struct InvalidRangeError {
    /// Why the input was rejected.
    pub reason: InvalidReason,
}

impl InvalidRangeError {
    /// Creates a new error for the given reason.
    #[must_use]
    pub fn new(reason: InvalidReason) -> Self {
        Self { reason }
    }
}

impl From<InvalidReason> for InvalidRangeError {
    fn from(reason: InvalidReason) -> Self {
        Self::new(reason)
    }
}

/// Errors raised while deriving a concentrated liquidity position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiquidityError {
    /// Lower bound is not strictly below the upper bound.
    #[error("degenerate range [{lower}, {upper}]: adjust your range")]
    InvertedRange {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// A price or the capital is non-positive or not finite.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The liquidity denominator collapsed to zero or below.
    #[error("liquidity denominator is {denominator}: adjust your range")]
    DegenerateLiquidity {
        /// Value of one unit of liquidity at the entry price.
        denominator: f64,
    },
}
