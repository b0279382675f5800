//! Return statistics over daily price series.

/// Trading days per year for crypto markets.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Log returns `ln(p_i / p_{i-1})`.
///
/// Returns `None` if any price is non-positive or not finite.
pub fn log_returns(prices: &[f64]) -> Option<Vec<f64>> {
    if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
        return None;
    }
    Some(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Population standard deviation `sqrt(Σ(r - μ)² / n)`.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

/// Annualized historical volatility in percent: `σ * sqrt(365) * 100`.
///
/// Needs at least two prices to form a return.
pub fn annualized_volatility_pct(prices: &[f64]) -> Option<f64> {
    let returns = log_returns(prices)?;
    let sigma = population_std_dev(&returns)?;
    Some(sigma * DAYS_PER_YEAR.sqrt() * 100.0)
}
