//! Volatility-based range suggestion and the auto/manual range mode.

use lp_sim_domain::enums::RangeMode;
use lp_sim_domain::error::{InvalidRangeError, InvalidReason};
use lp_sim_domain::metrics::fees::YEAR_DAYS;
use lp_sim_domain::value_objects::PriceRange;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest multiple of the spot price the low side of a range or scenario
/// may reach, keeps it strictly positive when the move is 100% or more.
pub const MIN_LOW_SIDE_FACTOR: f64 = 0.01;

/// Relative slack, in ulps, absorbed before rounding a move up to the next
/// hundredth.
const CEIL_SLACK_ULPS: f64 = 4.0;

/// Expected one-sigma move over a horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolPeriod {
    /// `(vol / 100) * sqrt(days / 365)`.
    pub raw: f64,
    /// `raw` rounded up to the next 0.01, at least 0.01 for any positive move.
    pub range_width: f64,
}

impl VolPeriod {
    /// Computes the move for `volatility_pct` over `days`.
    #[must_use]
    pub fn new(volatility_pct: f64, days: u32) -> Self {
        Self::from_raw((volatility_pct / 100.0) * (f64::from(days) / YEAR_DAYS).sqrt())
    }

    /// Wraps an already computed move. Negative or non-finite moves become 0.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        let raw = if raw.is_finite() { raw.max(0.0) } else { 0.0 };

        // Absorbs a few ulps of noise: 0.20 stays 0.20, 0.20 + 1e-11 becomes 0.21.
        let scaled = raw * 100.0;
        let scaled = scaled - scaled * f64::EPSILON * CEIL_SLACK_ULPS;
        let mut range_width = scaled.max(0.0).ceil() / 100.0;
        if raw > 0.0 {
            range_width = range_width.max(0.01);
        }

        Self { raw, range_width }
    }

    /// `P * (1 + raw)`.
    #[must_use]
    pub fn high_price(&self, price: f64) -> f64 {
        price * (1.0 + self.raw)
    }

    /// `P * (1 - raw)`, floored at [`MIN_LOW_SIDE_FACTOR`] of `price`.
    #[must_use]
    pub fn low_price(&self, price: f64) -> f64 {
        price * low_side_factor(self.raw)
    }
}

fn low_side_factor(mv: f64) -> f64 {
    (1.0 - mv).max(MIN_LOW_SIDE_FACTOR)
}

/// Range `[P * (1 - w), P * (1 + w)]` with `w` the rounded-up volatility
/// move over the horizon. The lower bound never drops below
/// [`MIN_LOW_SIDE_FACTOR`] of the spot price.
///
/// # Errors
/// Returns [`InvalidRangeError`] for a non-positive spot, volatility or
/// horizon.
pub fn suggest_range(
    spot_price: f64,
    volatility_pct: f64,
    days: u32,
) -> Result<PriceRange, InvalidRangeError> {
    if !spot_price.is_finite() || !volatility_pct.is_finite() {
        return Err(InvalidReason::NonFiniteValue.into());
    }
    if spot_price <= 0.0 {
        return Err(InvalidReason::NonPositiveSpot.into());
    }
    if volatility_pct <= 0.0 {
        return Err(InvalidReason::VolatilityOutOfBounds.into());
    }
    if days == 0 {
        return Err(InvalidReason::DaysOutOfBounds.into());
    }

    let width = VolPeriod::new(volatility_pct, days).range_width;
    PriceRange::try_new(
        spot_price * low_side_factor(width),
        spot_price * (1.0 + width),
    )
}

/// Holds the range bounds and whether they follow suggestions.
///
/// In [`RangeMode::Auto`] every market update recomputes the range. Editing
/// either bound switches to [`RangeMode::Manual`], which ignores updates
/// until [`RangeController::reset_to_auto`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeController {
    mode: RangeMode,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl RangeController {
    /// Creates a controller in auto mode with no range yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> RangeMode {
        self.mode
    }

    /// Current range.
    ///
    /// # Errors
    /// Fails while a bound is missing or the bounds are inverted.
    pub fn range(&self) -> Result<PriceRange, InvalidRangeError> {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => PriceRange::try_new(lower, upper),
            _ => Err(InvalidReason::EmptyRange.into()),
        }
    }

    /// Applies new market inputs. Recomputes only in auto mode.
    ///
    /// # Errors
    /// Propagates [`suggest_range`] errors in auto mode.
    pub fn on_market_update(
        &mut self,
        spot_price: f64,
        volatility_pct: f64,
        days: u32,
    ) -> Result<Option<PriceRange>, InvalidRangeError> {
        if self.mode == RangeMode::Manual {
            debug!("Manual range active, ignoring suggestion");
            return Ok(None);
        }
        let range = suggest_range(spot_price, volatility_pct, days)?;
        self.lower = Some(range.lower());
        self.upper = Some(range.upper());
        Ok(Some(range))
    }

    /// Sets the lower bound and switches to manual mode.
    pub fn edit_lower(&mut self, lower: f64) {
        self.lower = Some(lower);
        self.mode = RangeMode::Manual;
    }

    /// Sets the upper bound and switches to manual mode.
    pub fn edit_upper(&mut self, upper: f64) {
        self.upper = Some(upper);
        self.mode = RangeMode::Manual;
    }

    /// Returns to auto mode and recomputes the range immediately.
    ///
    /// # Errors
    /// Propagates [`suggest_range`] errors; the mode is auto either way.
    pub fn reset_to_auto(
        &mut self,
        spot_price: f64,
        volatility_pct: f64,
        days: u32,
    ) -> Result<PriceRange, InvalidRangeError> {
        self.mode = RangeMode::Auto;
        self.on_market_update(spot_price, volatility_pct, days)?
            .ok_or(InvalidReason::EmptyRange.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vol_period_reference_scenario() {
        let period = VolPeriod::new(55.0, 7);
        assert_relative_eq!(period.raw, 0.55 * (7.0f64 / 365.0).sqrt());
        assert!((period.raw - 0.0762).abs() < 1e-4);
        assert_relative_eq!(period.range_width, 0.08);
    }

    #[test]
    fn test_exact_hundredth_not_rounded_up() {
        // 20% over a full year is exactly 0.20
        assert_relative_eq!(VolPeriod::new(20.0, 365).range_width, 0.20);
    }

    #[test]
    fn test_ceil_keeps_moves_just_above_a_hundredth() {
        assert_relative_eq!(VolPeriod::from_raw(0.07 + 1e-11).range_width, 0.08);
        assert_relative_eq!(VolPeriod::from_raw(0.07).range_width, 0.07);
        assert_eq!(VolPeriod::from_raw(f64::NAN).raw, 0.0);
        assert_eq!(VolPeriod::from_raw(0.0).range_width, 0.0);
    }

    #[test]
    fn test_large_move_keeps_upside() {
        // 150% over a full year is a 1.5 move
        let period = VolPeriod::new(150.0, 365);
        assert_relative_eq!(period.raw, 1.5);
        assert_relative_eq!(period.range_width, 1.5);
        assert_relative_eq!(period.high_price(100.0), 250.0);
        assert_relative_eq!(period.low_price(100.0), 100.0 * MIN_LOW_SIDE_FACTOR);

        let range = suggest_range(100.0, 150.0, 365).unwrap();
        assert_relative_eq!(range.upper(), 250.0);
        assert_relative_eq!(range.lower(), 1.0);
    }

    #[test]
    fn test_largest_move_stays_positive() {
        let period = VolPeriod::new(200.0, 365);
        assert_relative_eq!(period.raw, 2.0);
        let range = suggest_range(100.0, 200.0, 365).unwrap();
        assert!(range.lower() > 0.0);
        assert_relative_eq!(range.upper(), 300.0);
    }

    #[test]
    fn test_suggest_range_brackets_spot() {
        let range = suggest_range(3200.0, 55.0, 7).unwrap();
        assert_relative_eq!(range.lower(), 3200.0 * 0.92);
        assert_relative_eq!(range.upper(), 3200.0 * 1.08);

        let tiny = suggest_range(1.0, 0.001, 1).unwrap();
        assert!(tiny.lower() < 1.0 && tiny.upper() > 1.0);
    }

    #[test]
    fn test_suggest_range_rejects_bad_input() {
        assert_eq!(
            suggest_range(0.0, 50.0, 7).unwrap_err().reason,
            InvalidReason::NonPositiveSpot
        );
        assert_eq!(
            suggest_range(10.0, 0.0, 7).unwrap_err().reason,
            InvalidReason::VolatilityOutOfBounds
        );
        assert_eq!(
            suggest_range(10.0, 50.0, 0).unwrap_err().reason,
            InvalidReason::DaysOutOfBounds
        );
    }

    #[test]
    fn test_manual_edit_freezes_range() {
        let mut controller = RangeController::new();
        assert_eq!(controller.mode(), RangeMode::Auto);
        assert!(controller.range().is_err());

        let auto = controller.on_market_update(100.0, 50.0, 30).unwrap().unwrap();
        assert_eq!(controller.range().unwrap(), auto);

        controller.edit_lower(90.0);
        assert_eq!(controller.mode(), RangeMode::Manual);
        assert_eq!(controller.on_market_update(200.0, 80.0, 30).unwrap(), None);
        let manual = controller.range().unwrap();
        assert_eq!(manual.lower(), 90.0);
        assert_eq!(manual.upper(), auto.upper());

        controller.edit_upper(95.0);
        assert_eq!(controller.range().unwrap().upper(), 95.0);

        let reset = controller.reset_to_auto(200.0, 80.0, 30).unwrap();
        assert_eq!(controller.mode(), RangeMode::Auto);
        assert!(reset.lower() < 200.0 && reset.upper() > 200.0);
    }

    #[test]
    fn test_inverted_manual_edit_reported() {
        let mut controller = RangeController::new();
        controller.on_market_update(100.0, 50.0, 30).unwrap();
        controller.edit_lower(500.0);
        assert_eq!(
            controller.range().unwrap_err().reason,
            InvalidReason::EmptyRange
        );
    }
}
