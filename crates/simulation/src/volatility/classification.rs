//! Static volatility by asset class.

use lp_sim_domain::entities::{TokenCatalog, TokenId};
use lp_sim_domain::value_objects::VolatilityResult;

/// Last-resort estimate: majors 50%, DeFi blue chips 65%, layer-2 75%,
/// otherwise the token's own default or 80%.
#[derive(Debug, Clone, Default)]
pub struct AssetClassification {
    catalog: TokenCatalog,
}

impl AssetClassification {
    /// Creates a classifier over `catalog`.
    #[must_use]
    pub fn new(catalog: TokenCatalog) -> Self {
        Self { catalog }
    }

    /// Classifies `token`, tagging the result as a fallback.
    #[must_use]
    pub fn classify(&self, token: &TokenId) -> VolatilityResult {
        let profile = self.catalog.profile_or_default(token);
        VolatilityResult::fallback(profile.fallback_volatility_pct())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_sim_domain::value_objects::VolatilityStatus;

    #[test]
    fn test_classify() {
        let classifier = AssetClassification::new(TokenCatalog::builtin());
        let btc = classifier.classify(&TokenId::new("bitcoin"));
        assert_eq!(btc.value_pct, 50.0);
        assert_eq!(btc.status, VolatilityStatus::Fallback);

        let empty = AssetClassification::default();
        assert_eq!(empty.classify(&TokenId::new("bitcoin")).value_pct, 80.0);
    }
}
