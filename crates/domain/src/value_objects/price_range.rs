use crate::error::{InvalidRangeError, InvalidReason};
use crate::value_objects::price::Price;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: Price,
    pub upper_price: Price,
}

impl PriceRange {
    pub fn new(lower: Price, upper: Price) -> Self {
        Self {
            lower_price: lower,
            upper_price: upper,
        }
    }

    /// Builds a range, rejecting non-positive or empty bounds.
    ///
    /// # Errors
    /// Returns [`InvalidRangeError`] when `lower <= 0` or `lower >= upper`.
    pub fn try_new(lower: f64, upper: f64) -> Result<Self, InvalidRangeError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(InvalidReason::NonFiniteValue.into());
        }
        if lower <= 0.0 {
            return Err(InvalidReason::NonPositiveLower.into());
        }
        if lower >= upper {
            return Err(InvalidReason::EmptyRange.into());
        }
        Ok(Self::new(Price::new(lower), Price::new(upper)))
    }

    pub fn contains(&self, price: Price) -> bool {
        price.value >= self.lower_price.value && price.value <= self.upper_price.value
    }

    pub fn width(&self) -> f64 {
        self.upper_price.value - self.lower_price.value
    }

    pub fn lower(&self) -> f64 {
        self.lower_price.value
    }

    pub fn upper(&self) -> f64 {
        self.upper_price.value
    }
}
