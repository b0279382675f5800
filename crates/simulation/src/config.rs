//! Simulation configuration.

/// Fewest daily prices a history window needs to produce an estimate.
pub const MIN_HISTORY_POINTS: usize = 5;

/// Tunables shared by the estimator, the projector and the facade.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// History windows in days, tried in order.
    pub history_windows: Vec<u32>,
    /// Minimum points a window must return. Never below [`MIN_HISTORY_POINTS`].
    pub min_history_points: usize,
    /// Number of sampled points on the value curve.
    pub curve_points: usize,
    /// Curve extension beyond each bound, as a fraction of the range width.
    pub curve_padding: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            history_windows: vec![30, 7, 1],
            min_history_points: MIN_HISTORY_POINTS,
            curve_points: 51,
            curve_padding: 0.3,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the history windows. Zero-day windows are dropped.
    #[must_use]
    pub fn with_history_windows(mut self, windows: impl Into<Vec<u32>>) -> Self {
        self.history_windows = windows.into().into_iter().filter(|d| *d > 0).collect();
        self
    }

    /// Sets the minimum history length, floored at [`MIN_HISTORY_POINTS`].
    #[must_use]
    pub fn with_min_history_points(mut self, points: usize) -> Self {
        self.min_history_points = points.max(MIN_HISTORY_POINTS);
        self
    }

    /// Sets the number of curve samples (at least 2).
    #[must_use]
    pub fn with_curve_points(mut self, points: usize) -> Self {
        self.curve_points = points.max(2);
        self
    }

    /// Sets the curve padding fraction.
    #[must_use]
    pub fn with_curve_padding(mut self, padding: f64) -> Self {
        if padding.is_finite() && padding >= 0.0 {
            self.curve_padding = padding;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_floors() {
        let config = SimulationConfig::new()
            .with_history_windows(vec![14, 0, 3])
            .with_min_history_points(3)
            .with_curve_points(1)
            .with_curve_padding(-1.0);

        assert_eq!(config.history_windows, vec![14, 3]);
        assert_eq!(config.min_history_points, MIN_HISTORY_POINTS);
        assert_eq!(config.curve_points, 2);
        assert_eq!(config.curve_padding, 0.3);
    }
}
