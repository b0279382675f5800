//! Scenario projection over a fixed position.
//!
//! The projector values the position (normalized to the principal at entry)
//! and the 50/50 HODL baseline at arbitrary prices, at the ±1σ scenario
//! prices and along a sampled curve around the range.

use crate::analyzer::ImpermanentLossAnalyzer;
use crate::error::SimulationError;
use crate::range::VolPeriod;
use lp_sim_domain::error::{InvalidRangeError, InvalidReason};
use lp_sim_domain::math::concentrated_liquidity::LiquidityPosition;
use lp_sim_domain::metrics::HodlBaseline;
use lp_sim_domain::value_objects::SimulationInput;
use serde::{Deserialize, Serialize};

/// Position and HODL values at one projected price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Projected price.
    pub price: f64,
    /// Value of holding the entry split.
    pub hodl_value: f64,
    /// Normalized LP value.
    pub lp_value: f64,
    /// LP value plus period fees.
    pub lp_value_with_fees: f64,
    /// `(lp - hodl) / hodl * 100`.
    pub il_pct: f64,
    /// `hodl - lp`.
    pub il_dollar: f64,
}

/// Up and down one-sigma scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub high: ScenarioResult,
    pub low: ScenarioResult,
}

/// One sample of the value curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: f64,
    pub lp_value: f64,
    pub hodl_value: f64,
    pub il_pct: f64,
    pub in_range: bool,
}

/// Values a position against its HODL baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioProjector {
    position: LiquidityPosition,
    hodl: HodlBaseline,
    lp_multiplier: f64,
}

impl ScenarioProjector {
    /// Opens the position described by `input`.
    ///
    /// # Errors
    /// Returns [`SimulationError::DegenerateLiquidity`] when the range cannot
    /// hold liquidity.
    pub fn new(input: &SimulationInput) -> Result<Self, SimulationError> {
        let position = LiquidityPosition::open(input.principal, input.spot_price, input.range())?;
        let hodl = HodlBaseline::new(input.principal, input.spot_price)
            .map_err(|_| InvalidRangeError::new(InvalidReason::NonPositiveSpot))?;

        let entry_value = position.value_at_price(input.spot_price);
        let lp_multiplier = input.principal / entry_value;

        Ok(Self {
            position,
            hodl,
            lp_multiplier,
        })
    }

    /// The underlying position.
    #[must_use]
    pub fn position(&self) -> &LiquidityPosition {
        &self.position
    }

    /// Factor scaling raw position value to the principal at entry.
    #[must_use]
    pub fn lp_multiplier(&self) -> f64 {
        self.lp_multiplier
    }

    /// LP value at `price`, equal to the principal at the entry price.
    #[must_use]
    pub fn lp_value(&self, price: f64) -> f64 {
        self.position.value_at_price(price) * self.lp_multiplier
    }

    /// HODL baseline value at `price`.
    #[must_use]
    pub fn hodl_value(&self, price: f64) -> f64 {
        self.hodl.value_at_price(price)
    }

    /// Scenario prices `(high, low) = P * (1 ± raw move)`. Only the low side
    /// is floored, see [`VolPeriod::low_price`].
    #[must_use]
    pub fn scenario_prices(&self, period: VolPeriod) -> (f64, f64) {
        let entry = self.position.entry_price;
        (period.high_price(entry), period.low_price(entry))
    }

    /// Evaluates both one-sigma scenarios.
    #[must_use]
    pub fn project(&self, period: VolPeriod, analyzer: &ImpermanentLossAnalyzer) -> Scenarios {
        let (high, low) = self.scenario_prices(period);
        Scenarios {
            high: self.evaluate(high, analyzer),
            low: self.evaluate(low, analyzer),
        }
    }

    /// Evaluates a single price.
    #[must_use]
    pub fn evaluate(&self, price: f64, analyzer: &ImpermanentLossAnalyzer) -> ScenarioResult {
        analyzer.scenario(price, self.lp_value(price), self.hodl_value(price))
    }

    /// Samples `points` prices evenly over the range widened by `padding`
    /// times its width on each side. Prices below zero are clipped to zero.
    #[must_use]
    pub fn curve(
        &self,
        points: usize,
        padding: f64,
        analyzer: &ImpermanentLossAnalyzer,
    ) -> Vec<CurvePoint> {
        let range = self.position.range;
        let margin = range.width() * padding;
        let start = (range.lower() - margin).max(0.0);
        let end = range.upper() + margin;
        let points = points.max(2);
        let step = (end - start) / (points - 1) as f64;

        (0..points)
            .map(|i| {
                let price = if i == points - 1 {
                    end
                } else {
                    start + step * i as f64
                };
                let lp_value = self.lp_value(price);
                let hodl_value = self.hodl_value(price);
                CurvePoint {
                    price,
                    lp_value,
                    hodl_value,
                    il_pct: analyzer.il_pct(lp_value, hodl_value).percentage_loss,
                    in_range: self.position.is_in_range(price),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input() -> SimulationInput {
        SimulationInput {
            principal: 3000.0,
            days: 7,
            volatility_pct: 55.0,
            expected_apr: 20.0,
            spot_price: 3200.0,
            price_low: 2900.0,
            price_high: 3500.0,
        }
    }

    #[test]
    fn test_lp_value_normalized_at_entry() {
        let projector = ScenarioProjector::new(&input()).unwrap();
        assert_relative_eq!(projector.lp_value(3200.0), 3000.0, max_relative = 1e-12);
        assert_relative_eq!(projector.hodl_value(3200.0), 3000.0, max_relative = 1e-12);
        assert_relative_eq!(projector.lp_multiplier(), 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_scenarios_show_loss_both_ways() {
        let input = input();
        let projector = ScenarioProjector::new(&input).unwrap();
        let analyzer = ImpermanentLossAnalyzer::new(&input);
        let period = VolPeriod::new(input.volatility_pct, input.days);

        let scenarios = projector.project(period, &analyzer);
        assert_relative_eq!(scenarios.high.price, 3200.0 * (1.0 + period.raw));
        assert_relative_eq!(scenarios.low.price, 3200.0 * (1.0 - period.raw));
        // A concentrated position underperforms HODL on any move
        assert!(scenarios.high.il_dollar > 0.0);
        assert!(scenarios.low.il_dollar > 0.0);
        assert!(scenarios.high.il_pct < 0.0);
        assert!(scenarios.low.il_pct < 0.0);
    }

    #[test]
    fn test_high_volatility_scenarios() {
        let input = SimulationInput {
            principal: 1000.0,
            days: 365,
            volatility_pct: 150.0,
            spot_price: 100.0,
            price_low: 50.0,
            price_high: 200.0,
            ..input()
        };
        let projector = ScenarioProjector::new(&input).unwrap();
        let analyzer = ImpermanentLossAnalyzer::new(&input);
        let scenarios = projector.project(VolPeriod::new(150.0, 365), &analyzer);

        assert_relative_eq!(scenarios.high.price, 250.0);
        assert_relative_eq!(scenarios.high.hodl_value, 1000.0 / 200.0 * 250.0 + 500.0);
        assert!(scenarios.low.price > 0.0);
        assert_relative_eq!(scenarios.low.price, 1.0);
    }

    #[test]
    fn test_curve_shape() {
        let input = input();
        let projector = ScenarioProjector::new(&input).unwrap();
        let analyzer = ImpermanentLossAnalyzer::new(&input);

        let curve = projector.curve(51, 0.3, &analyzer);
        assert_eq!(curve.len(), 51);
        assert_relative_eq!(curve[0].price, 2900.0 - 180.0);
        assert_relative_eq!(curve[50].price, 3500.0 + 180.0);
        assert!(!curve[0].in_range);
        assert!(curve[25].in_range);
        assert!(!curve[50].in_range);
        assert!(curve.windows(2).all(|w| w[0].price < w[1].price));

        // Above the range the position is all stable and flat
        let top = projector.lp_value(3500.0);
        assert_relative_eq!(curve[50].lp_value, top, max_relative = 1e-12);
    }

    #[test]
    fn test_curve_clipped_at_zero() {
        let input = SimulationInput {
            principal: 1000.0,
            spot_price: 10.0,
            price_low: 1.0,
            price_high: 20.0,
            ..input()
        };
        let projector = ScenarioProjector::new(&input).unwrap();
        let analyzer = ImpermanentLossAnalyzer::new(&input);
        let curve = projector.curve(11, 0.3, &analyzer);
        assert_eq!(curve[0].price, 0.0);
        assert_eq!(curve[0].lp_value, 0.0);
    }
}
