use crate::metrics::fees::annualize_pct;
use serde::{Deserialize, Serialize};

/// Counterfactual of holding a 50/50 split of `capital` bought at `entry_price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HodlBaseline {
    /// Volatile units bought with half the capital.
    pub volatile_tokens: f64,
    /// Stable units kept from the other half.
    pub stable_amount: f64,
}

impl HodlBaseline {
    /// Splits `capital` evenly at `entry_price`.
    ///
    /// # Errors
    /// Fails if `entry_price` is not positive.
    pub fn new(capital: f64, entry_price: f64) -> Result<Self, &'static str> {
        if entry_price <= 0.0 || !entry_price.is_finite() {
            return Err("Entry price must be positive");
        }
        Ok(Self {
            volatile_tokens: capital / (2.0 * entry_price),
            stable_amount: capital / 2.0,
        })
    }

    /// `volatile_tokens * price + stable_amount`.
    pub fn value_at_price(&self, price: f64) -> f64 {
        self.volatile_tokens * price + self.stable_amount
    }
}

/// LP value compared to holding, at one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpermanentLoss {
    /// `hodl - lp`; negative when the LP outperformed holding.
    pub absolute_loss_usd: f64,
    /// `(lp - hodl) / hodl * 100`; negative is a loss.
    pub percentage_loss: f64,
    /// Set when the HODL value was zero and the percentage was forced to 0.
    pub zero_hodl_value: bool,
}

impl ImpermanentLoss {
    pub fn measure(lp_value: f64, hodl_value: f64) -> Self {
        let absolute_loss_usd = hodl_value - lp_value;
        if hodl_value == 0.0 {
            return Self {
                absolute_loss_usd,
                percentage_loss: 0.0,
                zero_hodl_value: true,
            };
        }
        Self {
            absolute_loss_usd,
            percentage_loss: (lp_value - hodl_value) / hodl_value * 100.0,
            zero_hodl_value: false,
        }
    }
}

/// Fee APR, in percent, that offsets the expected IL over the horizon.
///
/// Averages the positive parts of the dollar IL in the up and down
/// scenarios and annualizes it against `capital`. Never negative.
pub fn calculate_break_even_apr(
    il_dollar_high: f64,
    il_dollar_low: f64,
    capital: f64,
    days: u32,
) -> Result<f64, &'static str> {
    let expected_loss = (il_dollar_high.max(0.0) + il_dollar_low.max(0.0)) / 2.0;
    Ok(annualize_pct(expected_loss, capital, days)?.max(0.0))
}
