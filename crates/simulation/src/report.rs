//! Simulation report and its provenance metadata.

use crate::range::VolPeriod;
use crate::scenario::{CurvePoint, Scenarios};
use lp_sim_domain::enums::{RangeMode, SpotSource};
use lp_sim_domain::value_objects::{PriceRange, VolatilityResult, VolatilityStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the entry value held in each token, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub volatile: f64,
    pub stable: f64,
}

/// Where the market inputs of a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    pub spot: SpotSource,
    pub volatility: VolatilityStatus,
}

impl DataQuality {
    /// True when either input came from a static table.
    #[must_use]
    pub fn is_estimated(&self) -> bool {
        self.spot == SpotSource::Estimated || self.volatility == VolatilityStatus::Fallback
    }
}

/// Non-fatal conditions surfaced alongside a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SimulationWarning {
    /// HODL value reached zero somewhere on the curve; IL reported as 0 there.
    ZeroHodlValue,
    /// The spot price feed failed and a reference price was used.
    EstimatedSpotPrice,
    /// No usable history; volatility comes from the asset class table.
    EstimatedVolatility,
    /// The estimate was outside the accepted bounds and was clamped.
    VolatilityClamped { from: f64, to: f64 },
}

impl fmt::Display for SimulationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHodlValue => f.write_str("HODL value is zero at some prices, IL shown as 0%"),
            Self::EstimatedSpotPrice => f.write_str("spot price is an estimate"),
            Self::EstimatedVolatility => f.write_str("volatility is an asset-class estimate"),
            Self::VolatilityClamped { from, to } => {
                write!(f, "volatility {from:.1}% clamped to {to:.1}%")
            }
        }
    }
}

/// Provenance of the inputs handed to [`crate::facade::simulate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub volatility: VolatilityResult,
    pub spot_source: SpotSource,
    pub range_mode: RangeMode,
    pub warnings: Vec<SimulationWarning>,
}

impl ReportContext {
    /// Context for fully caller-supplied inputs.
    #[must_use]
    pub fn user_input(volatility_pct: f64, range_mode: RangeMode) -> Self {
        Self {
            volatility: VolatilityResult::user_input(volatility_pct),
            spot_source: SpotSource::UserInput,
            range_mode,
            warnings: Vec::new(),
        }
    }

    /// Adds a warning unless already present.
    #[must_use]
    pub fn with_warning(mut self, warning: SimulationWarning) -> Self {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
        self
    }
}

/// Result of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// `C / unit_value(P)`: liquidity scaled so the position is worth exactly
    /// the principal at entry (`token0 * P + token1 = C`). Not the on-chain
    /// `L` of a sqrt-price pool.
    pub liquidity: f64,
    pub token0_amount: f64,
    pub token1_amount: f64,
    pub composition_pct: Composition,
    pub curve: Vec<CurvePoint>,
    pub scenarios: Scenarios,
    pub break_even_apr: f64,
    pub period_fees: f64,
    pub volatility: VolatilityResult,
    pub spot_price: f64,
    pub range: PriceRange,
    pub range_mode: RangeMode,
    pub vol_period: VolPeriod,
    pub data_quality: DataQuality,
    pub warnings: Vec<SimulationWarning>,
}

impl Report {
    /// True when `warning` was raised.
    #[must_use]
    pub fn has_warning(&self, warning: &SimulationWarning) -> bool {
        self.warnings.contains(warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_serialization() {
        let json = serde_json::to_string(&SimulationWarning::VolatilityClamped {
            from: 250.0,
            to: 200.0,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"volatility_clamped","from":250.0,"to":200.0}"#);
        assert_eq!(
            serde_json::to_string(&SimulationWarning::ZeroHodlValue).unwrap(),
            r#"{"kind":"zero_hodl_value"}"#
        );
    }

    #[test]
    fn test_context_deduplicates_warnings() {
        let context = ReportContext::user_input(50.0, RangeMode::Manual)
            .with_warning(SimulationWarning::EstimatedSpotPrice)
            .with_warning(SimulationWarning::EstimatedSpotPrice);
        assert_eq!(context.warnings, vec![SimulationWarning::EstimatedSpotPrice]);
        assert_eq!(context.volatility.status, VolatilityStatus::Success);
    }

    #[test]
    fn test_data_quality_estimated() {
        let live = DataQuality {
            spot: SpotSource::Live,
            volatility: VolatilityStatus::Success,
        };
        assert!(!live.is_estimated());
        assert!(
            DataQuality {
                volatility: VolatilityStatus::Fallback,
                ..live
            }
            .is_estimated()
        );
    }
}
