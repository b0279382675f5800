use serde::{Deserialize, Serialize};

/// A quote-normalized price (stable units per volatile unit).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Price {
    pub value: f64,
}

impl Price {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// True for finite, strictly positive prices.
    pub fn is_valid(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }

    pub fn sqrt(&self) -> f64 {
        self.value.sqrt()
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
