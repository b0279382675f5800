/// Days used to de-annualize and annualize yields.
pub const YEAR_DAYS: f64 = 365.0;

/// Fees accrued over `days` at `apr_pct`, with simple daily accrual.
///
/// `capital * (apr_pct / 100 / 365) * days`. Never negative.
pub fn calculate_period_fees(capital: f64, apr_pct: f64, days: u32) -> f64 {
    let fees = capital * (apr_pct / 100.0 / YEAR_DAYS) * f64::from(days);
    fees.max(0.0)
}

/// Annualized yield in percent of earning `amount` on `principal` over `days`.
///
/// # Errors
/// Fails when `principal` is zero or `days` is zero.
pub fn annualize_pct(amount: f64, principal: f64, days: u32) -> Result<f64, &'static str> {
    if principal == 0.0 {
        return Err("Principal cannot be zero");
    }
    if days == 0 {
        return Err("Days cannot be zero");
    }
    let roi = amount / principal;
    Ok(roi * (YEAR_DAYS / f64::from(days)) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_period_fees() {
        // 3000 at 36.5% APR for 10 days = 3000 * 0.001 * 10
        assert_relative_eq!(calculate_period_fees(3000.0, 36.5, 10), 30.0, max_relative = 1e-12);
        assert_eq!(calculate_period_fees(3000.0, 0.0, 30), 0.0);
    }

    #[test]
    fn test_annualize_inverts_period_fees() {
        let fees = calculate_period_fees(5000.0, 42.0, 17);
        assert_relative_eq!(annualize_pct(fees, 5000.0, 17).unwrap(), 42.0, max_relative = 1e-12);
        assert!(annualize_pct(1.0, 0.0, 7).is_err());
        assert!(annualize_pct(1.0, 10.0, 0).is_err());
    }
}
