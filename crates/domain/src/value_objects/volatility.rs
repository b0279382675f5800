//! Outcome of a volatility estimation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the estimate came from market data or a static fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityStatus {
    Success,
    Fallback,
}

/// Where an estimate originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VolatilitySource {
    /// Realized volatility over a daily history window.
    History { window_days: u32 },
    /// Static asset-class classification.
    CorrelationEstimate,
    /// Supplied by the caller.
    UserInput,
}

impl fmt::Display for VolatilitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History { window_days } => write!(f, "{window_days}d_history"),
            Self::CorrelationEstimate => f.write_str("correlation_estimate"),
            Self::UserInput => f.write_str("user_input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityResult {
    /// Annualized volatility in percent, rounded to an integer.
    pub value_pct: f64,
    /// Tag such as `30d_history` or `correlation_estimate`.
    pub source_tag: String,
    pub source: VolatilitySource,
    pub status: VolatilityStatus,
}

impl VolatilityResult {
    /// Estimate computed from `window_days` of history.
    pub fn from_history(value_pct: f64, window_days: u32) -> Self {
        Self::build(
            value_pct.round(),
            VolatilitySource::History { window_days },
            VolatilityStatus::Success,
        )
    }

    /// Estimate taken from the static classification table.
    pub fn fallback(value_pct: f64) -> Self {
        Self::build(
            value_pct.round(),
            VolatilitySource::CorrelationEstimate,
            VolatilityStatus::Fallback,
        )
    }

    /// Caller-supplied volatility, kept as given.
    pub fn user_input(value_pct: f64) -> Self {
        Self::build(
            value_pct,
            VolatilitySource::UserInput,
            VolatilityStatus::Success,
        )
    }

    fn build(value_pct: f64, source: VolatilitySource, status: VolatilityStatus) -> Self {
        Self {
            value_pct,
            source_tag: source.to_string(),
            source,
            status,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.status == VolatilityStatus::Fallback
    }
}
