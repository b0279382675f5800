//! Impermanent loss, fee accrual and break-even analysis.

use crate::scenario::{ScenarioResult, Scenarios};
use lp_sim_domain::metrics::{ImpermanentLoss, calculate_break_even_apr, calculate_period_fees};
use lp_sim_domain::value_objects::SimulationInput;
use tracing::warn;

/// Derives IL and fee figures for one simulation input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpermanentLossAnalyzer {
    principal: f64,
    days: u32,
    period_fees: f64,
}

impl ImpermanentLossAnalyzer {
    /// Precomputes the period fees of `input`.
    #[must_use]
    pub fn new(input: &SimulationInput) -> Self {
        Self {
            principal: input.principal,
            days: input.days,
            period_fees: calculate_period_fees(input.principal, input.expected_apr, input.days),
        }
    }

    /// Fees accrued over the horizon (simple daily accrual).
    #[must_use]
    pub fn period_fees(&self) -> f64 {
        self.period_fees
    }

    /// IL between an LP value and a HODL value at the same price.
    #[must_use]
    pub fn il_pct(&self, lp_value: f64, hodl_value: f64) -> ImpermanentLoss {
        ImpermanentLoss::measure(lp_value, hodl_value)
    }

    /// Full scenario record at `price`.
    #[must_use]
    pub fn scenario(&self, price: f64, lp_value: f64, hodl_value: f64) -> ScenarioResult {
        let il = ImpermanentLoss::measure(lp_value, hodl_value);
        ScenarioResult {
            price,
            hodl_value,
            lp_value,
            lp_value_with_fees: lp_value + self.period_fees,
            il_pct: il.percentage_loss,
            il_dollar: il.absolute_loss_usd,
        }
    }

    /// Fee APR needed to offset the average positive IL of both scenarios.
    ///
    /// Zero principal or a zero-day horizon has no break-even; that case is
    /// logged and reported as 0.
    #[must_use]
    pub fn break_even_apr(&self, scenarios: &Scenarios) -> f64 {
        match calculate_break_even_apr(
            scenarios.high.il_dollar,
            scenarios.low.il_dollar,
            self.principal,
            self.days,
        ) {
            Ok(apr) => apr,
            Err(reason) => {
                warn!(
                    principal = self.principal,
                    days = self.days,
                    reason,
                    "Break-even APR undefined, reporting 0"
                );
                0.0
            }
        }
    }
}
