use crate::error::LiquidityError;
use crate::value_objects::price_range::PriceRange;
use serde::{Deserialize, Serialize};

/// Amount of the volatile token (x) held by `liquidity` across [sqrt_a, sqrt_b].
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
/// where P_a < P_b
pub fn get_amount0_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    if lower <= 0.0 {
        return 0.0;
    }
    liquidity * (1.0 / lower - 1.0 / upper)
}

/// Amount of the stable token (y) held by `liquidity` across [sqrt_a, sqrt_b].
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
/// where P_a < P_b
pub fn get_amount1_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity * (upper - lower)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a < b { (a, b) } else { (b, a) }
}

/// Token balances `(x, y)` of a position at `price`.
///
/// Below the range the position is all volatile, above it all stable,
/// inside it is split at `sqrt(price)`.
pub fn amounts_at_price(liquidity: f64, price: f64, sqrt_lower: f64, sqrt_upper: f64) -> (f64, f64) {
    let lower = sqrt_lower * sqrt_lower;
    let upper = sqrt_upper * sqrt_upper;
    if price <= lower {
        (get_amount0_delta(liquidity, sqrt_lower, sqrt_upper), 0.0)
    } else if price >= upper {
        (0.0, get_amount1_delta(liquidity, sqrt_lower, sqrt_upper))
    } else {
        let sqrt_p = price.sqrt();
        (
            get_amount0_delta(liquidity, sqrt_p, sqrt_upper),
            get_amount1_delta(liquidity, sqrt_lower, sqrt_p),
        )
    }
}

/// Value in stable units of a position at `price`.
///
/// * `price <= P_a`: `L * (1/sqrt(P_a) - 1/sqrt(P_b)) * price`
/// * `price >= P_b`: `L * (sqrt(P_b) - sqrt(P_a))`
/// * otherwise: `x * price + y` with `x = L * (1/sqrt(price) - 1/sqrt(P_b))`
///   and `y = L * (sqrt(price) - sqrt(P_a))`
///
/// Continuous at both bounds.
pub fn value_at_price(liquidity: f64, price: f64, sqrt_lower: f64, sqrt_upper: f64) -> f64 {
    let (x, y) = amounts_at_price(liquidity, price, sqrt_lower, sqrt_upper);
    x * price + y
}

/// A concentrated liquidity position opened with a fixed amount of capital.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    /// Liquidity constant L.
    pub liquidity: f64,
    /// Price at which the position was opened.
    pub entry_price: f64,
    /// Range the liquidity is concentrated in.
    pub range: PriceRange,
    /// Volatile-token units held at entry.
    pub token0_amount: f64,
    /// Stable-token units held at entry.
    pub token1_amount: f64,
    sqrt_lower: f64,
    sqrt_upper: f64,
}

impl LiquidityPosition {
    /// Deploys `capital` into `range` at `entry_price`.
    ///
    /// L is chosen so the position is worth exactly `capital` at entry:
    /// `L = capital / unit_value(entry_price)`, where `unit_value` is the
    /// three-branch value function evaluated with `L = 1`. Inside the range
    /// this is `sqrt(P) - sqrt(P_a) + P * (1/sqrt(P) - 1/sqrt(P_b))`.
    ///
    /// # Errors
    /// Returns [`LiquidityError`] for inverted or empty ranges, non-positive
    /// inputs, or a non-positive liquidity denominator.
    pub fn open(capital: f64, entry_price: f64, range: PriceRange) -> Result<Self, LiquidityError> {
        positive("capital", capital)?;
        positive("entry_price", entry_price)?;
        positive("price_lower", range.lower())?;
        positive("price_upper", range.upper())?;
        if range.lower() >= range.upper() {
            return Err(LiquidityError::InvertedRange {
                lower: range.lower(),
                upper: range.upper(),
            });
        }

        let sqrt_lower = range.lower().sqrt();
        let sqrt_upper = range.upper().sqrt();

        let denominator = value_at_price(1.0, entry_price, sqrt_lower, sqrt_upper);
        if !denominator.is_finite() || denominator <= 0.0 {
            return Err(LiquidityError::DegenerateLiquidity { denominator });
        }

        let liquidity = capital / denominator;
        let (token0_amount, token1_amount) =
            amounts_at_price(liquidity, entry_price, sqrt_lower, sqrt_upper);

        Ok(Self {
            liquidity,
            entry_price,
            range,
            token0_amount,
            token1_amount,
            sqrt_lower,
            sqrt_upper,
        })
    }

    /// Position value in stable units at `price`.
    pub fn value_at_price(&self, price: f64) -> f64 {
        value_at_price(self.liquidity, price, self.sqrt_lower, self.sqrt_upper)
    }

    /// Token balances `(volatile, stable)` at `price`.
    pub fn amounts_at_price(&self, price: f64) -> (f64, f64) {
        amounts_at_price(self.liquidity, price, self.sqrt_lower, self.sqrt_upper)
    }

    /// Share of entry value held in each token, in percent `(volatile, stable)`.
    pub fn composition_pct(&self) -> (f64, f64) {
        let volatile_value = self.token0_amount * self.entry_price;
        let total = volatile_value + self.token1_amount;
        if total <= 0.0 {
            return (0.0, 0.0);
        }
        let volatile = volatile_value / total * 100.0;
        (volatile, 100.0 - volatile)
    }

    pub fn is_in_range(&self, price: f64) -> bool {
        price >= self.range.lower() && price <= self.range.upper()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), LiquidityError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LiquidityError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_amount_deltas() {
        // Price goes from 1 to 4 (sqrt: 1 to 2)
        // delta_y = 1000 * (2 - 1) = 1000
        // delta_x = 1000 * (1/1 - 1/2) = 500
        let dy = get_amount1_delta(1000.0, 1.0, 2.0);
        assert_relative_eq!(dy, 1000.0);

        let dx = get_amount0_delta(1000.0, 2.0, 1.0);
        assert_relative_eq!(dx, 500.0);
    }

    #[test]
    fn test_value_branches() {
        // Range [1, 4], L = 1000
        assert_relative_eq!(value_at_price(1000.0, 0.5, 1.0, 2.0), 250.0);
        assert_relative_eq!(value_at_price(1000.0, 1.0, 1.0, 2.0), 500.0);
        // sqrt(2.25) = 1.5: x = 1000 * (1/1.5 - 1/2), y = 1000 * 0.5
        assert_relative_eq!(
            value_at_price(1000.0, 2.25, 1.0, 2.0),
            1000.0 / 6.0 * 2.25 + 500.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(value_at_price(1000.0, 4.0, 1.0, 2.0), 1000.0);
        assert_relative_eq!(value_at_price(1000.0, 9.0, 1.0, 2.0), 1000.0);
    }

    #[test]
    fn test_value_continuous_at_bounds() {
        let eps = 1e-9;
        for p in [1.0, 4.0] {
            let below = value_at_price(1000.0, p - eps, 1.0, 2.0);
            let above = value_at_price(1000.0, p + eps, 1.0, 2.0);
            assert_relative_eq!(below, above, max_relative = 1e-7);
        }
    }

    #[test]
    fn test_open_reference_scenario() {
        let range = PriceRange::try_new(2900.0, 3500.0).unwrap();
        let position = LiquidityPosition::open(3000.0, 3200.0, range).unwrap();

        assert!(position.liquidity > 0.0);
        assert_relative_eq!(
            position.token0_amount * 3200.0 + position.token1_amount,
            3000.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(position.value_at_price(3200.0), 3000.0, max_relative = 1e-12);

        let (volatile, stable) = position.composition_pct();
        assert_relative_eq!(volatile + stable, 100.0);
        assert!(volatile > 40.0 && volatile < 60.0);
    }

    #[test]
    fn test_open_out_of_range_is_single_sided() {
        let range = PriceRange::try_new(90.0, 110.0).unwrap();

        let below = LiquidityPosition::open(1000.0, 80.0, range).unwrap();
        assert_eq!(below.token1_amount, 0.0);
        assert_relative_eq!(below.token0_amount * 80.0, 1000.0, max_relative = 1e-12);

        let above = LiquidityPosition::open(1000.0, 120.0, range).unwrap();
        assert_eq!(above.token0_amount, 0.0);
        assert_relative_eq!(above.token1_amount, 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_open_rejects_degenerate_input() {
        let flat = PriceRange::new(100.0.into(), 100.0.into());
        assert!(matches!(
            LiquidityPosition::open(1000.0, 100.0, flat),
            Err(LiquidityError::InvertedRange { .. })
        ));

        let range = PriceRange::try_new(90.0, 110.0).unwrap();
        assert!(matches!(
            LiquidityPosition::open(0.0, 100.0, range),
            Err(LiquidityError::NonPositive { field: "capital", .. })
        ));
        assert!(matches!(
            LiquidityPosition::open(1000.0, f64::NAN, range),
            Err(LiquidityError::NonPositive { field: "entry_price", .. })
        ));
    }
}
