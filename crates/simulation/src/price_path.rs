use chrono::{DateTime, Duration, Utc};
use lp_sim_domain::value_objects::{PricePoint, PriceSeries};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of synthetic price paths.
pub trait PricePathGenerator {
    /// Returns `steps + 1` prices, starting with the initial price.
    fn generate(&mut self, steps: usize) -> Vec<f64>;
}

/// Geometric Brownian motion with constant drift and volatility.
pub struct GeometricBrownianMotion {
    pub initial_price: f64,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma), as a fraction
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
    rng: StdRng,
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: f64, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility: volatility.max(0.0),
            time_step,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Driftless daily path for a volatility given in percent.
    pub fn daily(initial_price: f64, volatility_pct: f64) -> Self {
        Self::new(initial_price, 0.0, volatility_pct / 100.0, 1.0 / 365.0)
    }

    /// Makes the path reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Generates a daily [`PriceSeries`] whose first point is at `start`.
    pub fn generate_series(&mut self, start: DateTime<Utc>, steps: usize) -> PriceSeries {
        let points = self
            .generate(steps)
            .into_iter()
            .enumerate()
            .map(|(day, price)| PricePoint::new(start + Duration::days(day as i64), price))
            .collect();
        PriceSeries::from_points(points)
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(self.initial_price);

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self.initial_price;
        for _ in 0..steps {
            let z: f64 = self.rng.sample(StandardNormal);
            current_price *= (drift_term + vol_term * z).exp();
            prices.push(current_price);
        }

        prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lp_sim_domain::math::statistics::annualized_volatility_pct;

    #[test]
    fn test_gbm_generation() {
        let mut gbm = GeometricBrownianMotion::daily(100.0, 20.0);
        let path = gbm.generate(10);

        assert_eq!(path.len(), 11); // initial + 10 steps
        assert_eq!(path[0], 100.0);
        assert!(path.iter().all(|p| *p > 0.0));
        assert!(!path.iter().all(|p| *p == 100.0));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = GeometricBrownianMotion::daily(50.0, 80.0).with_seed(7).generate(30);
        let b = GeometricBrownianMotion::daily(50.0, 80.0).with_seed(7).generate(30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_volatility_is_flat() {
        let path = GeometricBrownianMotion::daily(100.0, 0.0).generate(5);
        assert!(path.iter().all(|p| *p == 100.0));
    }

    #[test]
    fn test_realized_volatility_close_to_generator() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series = GeometricBrownianMotion::daily(3000.0, 60.0)
            .with_seed(42)
            .generate_series(start, 365);
        assert_eq!(series.len(), 366);
        assert_eq!(series.points()[1].timestamp, start + Duration::days(1));

        let prices: Vec<f64> = series.prices().collect();
        let realized = annualized_volatility_pct(&prices).unwrap();
        assert!((realized - 60.0).abs() < 12.0, "realized {realized}");
    }
}
