//! Storage-agnostic record of a simulated position.

use crate::error::RecordError;
use crate::report::Report;
use chrono::{DateTime, Utc};
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::value_objects::SimulationInput;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Headline figures of a simulation, rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub principal: Decimal,
    pub spot_price: Decimal,
    pub price_low: Decimal,
    pub price_high: Decimal,
    pub period_fees: Decimal,
    /// LP value with fees in the up scenario.
    pub high_value: Decimal,
    /// LP value with fees in the down scenario.
    pub low_value: Decimal,
    /// IL in the up scenario.
    pub high_il: Decimal,
    /// IL in the down scenario.
    pub low_il: Decimal,
    /// Fee APR offsetting the expected IL, in percent.
    pub break_even_apr: Decimal,
}

impl RecordSummary {
    /// Summarizes `report` for `input`.
    ///
    /// # Errors
    /// Returns [`RecordError::NonFinite`] if a figure is NaN or infinite.
    pub fn new(input: &SimulationInput, report: &Report) -> Result<Self, RecordError> {
        let scenarios = &report.scenarios;
        Ok(Self {
            principal: to_cents("principal", input.principal)?,
            spot_price: to_cents("spot_price", input.spot_price)?,
            price_low: to_cents("price_low", input.price_low)?,
            price_high: to_cents("price_high", input.price_high)?,
            period_fees: to_cents("period_fees", report.period_fees)?,
            high_value: to_cents("high_value", scenarios.high.lp_value_with_fees)?,
            low_value: to_cents("low_value", scenarios.low.lp_value_with_fees)?,
            high_il: to_cents("high_il", scenarios.high.il_dollar)?,
            low_il: to_cents("low_il", scenarios.low.il_dollar)?,
            break_even_apr: to_cents("break_even_apr", report.break_even_apr)?,
        })
    }
}

fn to_cents(field: &'static str, value: f64) -> Result<Decimal, RecordError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or(RecordError::NonFinite { field })
}

/// A simulation input and its report, ready to hand to any store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub token: TokenId,
    pub input: SimulationInput,
    pub summary: RecordSummary,
    pub report: Report,
}

impl PositionRecord {
    /// Creates a record with a fresh id.
    ///
    /// # Errors
    /// See [`RecordSummary::new`].
    pub fn from_simulation(
        token: TokenId,
        input: SimulationInput,
        report: Report,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            summary: RecordSummary::new(&input, &report)?,
            token,
            input,
            report,
        })
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`RecordError::Json`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record produced by [`Self::to_json_pretty`].
    ///
    /// # Errors
    /// Returns [`RecordError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }
}
