//! Validated parameters of a single position simulation.

use crate::error::{InvalidRangeError, InvalidReason};
use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use serde::{Deserialize, Serialize};

/// Shortest supported holding horizon in days.
pub const MIN_DAYS: u32 = 1;
/// Longest supported holding horizon in days.
pub const MAX_DAYS: u32 = 365;
/// Lowest accepted volatility, in percent.
pub const MIN_VOLATILITY_PCT: f64 = 1.0;
/// Highest accepted volatility, in percent.
pub const MAX_VOLATILITY_PCT: f64 = 200.0;
/// Highest accepted expected fee APR, in percent.
pub const MAX_EXPECTED_APR: f64 = 500.0;

/// Inputs of one simulation call. Immutable once validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Capital deployed, in USD.
    pub principal: f64,
    /// Holding horizon in days.
    pub days: u32,
    /// Annualized volatility assumption, in percent.
    pub volatility_pct: f64,
    /// Expected fee APR, in percent.
    pub expected_apr: f64,
    /// Entry price.
    pub spot_price: f64,
    /// Lower range bound.
    pub price_low: f64,
    /// Upper range bound.
    pub price_high: f64,
}

impl SimulationInput {
    /// Creates and validates an input.
    ///
    /// # Errors
    /// Returns [`InvalidRangeError`] with the first violated constraint.
    pub fn try_new(
        principal: f64,
        days: u32,
        volatility_pct: f64,
        expected_apr: f64,
        spot_price: f64,
        range: PriceRange,
    ) -> Result<Self, InvalidRangeError> {
        let input = Self {
            principal,
            days,
            volatility_pct,
            expected_apr,
            spot_price,
            price_low: range.lower(),
            price_high: range.upper(),
        };
        input.validate()?;
        Ok(input)
    }

    /// Checks every field against the input contract.
    ///
    /// # Errors
    /// Returns [`InvalidRangeError`] with the first violated constraint.
    pub fn validate(&self) -> Result<(), InvalidRangeError> {
        let values = [
            self.principal,
            self.volatility_pct,
            self.expected_apr,
            self.spot_price,
            self.price_low,
            self.price_high,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(InvalidReason::NonFiniteValue.into());
        }
        if self.principal <= 0.0 {
            return Err(InvalidReason::NonPositivePrincipal.into());
        }
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(InvalidReason::DaysOutOfBounds.into());
        }
        if !(MIN_VOLATILITY_PCT..=MAX_VOLATILITY_PCT).contains(&self.volatility_pct) {
            return Err(InvalidReason::VolatilityOutOfBounds.into());
        }
        if !(0.0..=MAX_EXPECTED_APR).contains(&self.expected_apr) {
            return Err(InvalidReason::AprOutOfBounds.into());
        }
        if self.spot_price <= 0.0 {
            return Err(InvalidReason::NonPositiveSpot.into());
        }
        PriceRange::try_new(self.price_low, self.price_high)?;
        Ok(())
    }

    /// The configured price range.
    #[must_use]
    pub fn range(&self) -> PriceRange {
        PriceRange::new(Price::new(self.price_low), Price::new(self.price_high))
    }

    /// The entry price.
    #[must_use]
    pub fn spot(&self) -> Price {
        Price::new(self.spot_price)
    }
}
