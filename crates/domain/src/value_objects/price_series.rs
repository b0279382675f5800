//! Ordered daily price observations for a single token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single (timestamp, price) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation time.
    pub timestamp: DateTime<Utc>,
    /// USD price at that time.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new observation.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Time-ordered price series. Points can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from observations, sorting them by timestamp.
    #[must_use]
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    /// Appends an observation. Points older than the last one are ignored.
    pub fn push(&mut self, point: PricePoint) {
        if self
            .points
            .last()
            .is_some_and(|last| point.timestamp < last.timestamp)
        {
            return;
        }
        self.points.push(point);
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in time order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices only, in time order.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Most recent price, if any.
    #[must_use]
    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}
