//! Token identities and the static classification used when market data is
//! unavailable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price-feed identifier of a token (e.g. `ethereum`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Coarse risk bucket of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Major,
    DefiBlueChip,
    Layer2,
    Stable,
    Other,
}

/// Volatility assumed for tokens nobody classified.
pub const DEFAULT_FALLBACK_VOLATILITY_PCT: f64 = 80.0;

impl AssetClass {
    /// Class-level volatility, `None` when the token's own default applies.
    pub fn class_volatility_pct(&self) -> Option<f64> {
        match self {
            Self::Major => Some(50.0),
            Self::DefiBlueChip => Some(65.0),
            Self::Layer2 => Some(75.0),
            Self::Stable | Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenProfile {
    pub id: TokenId,
    pub symbol: String,
    pub asset_class: AssetClass,
    /// Token-specific volatility used when its class has none.
    pub default_volatility_pct: Option<f64>,
    /// Last known USD price, used when the spot feed is down.
    pub reference_price: Option<f64>,
}

impl TokenProfile {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            id: TokenId::new(id),
            symbol: symbol.into(),
            asset_class,
            default_volatility_pct: None,
            reference_price: None,
        }
    }

    #[must_use]
    pub fn with_default_volatility(mut self, pct: f64) -> Self {
        self.default_volatility_pct = Some(pct);
        self
    }

    #[must_use]
    pub fn with_reference_price(mut self, price: f64) -> Self {
        self.reference_price = Some(price);
        self
    }

    /// Static volatility estimate: class value, else own default, else 80%.
    pub fn fallback_volatility_pct(&self) -> f64 {
        self.asset_class
            .class_volatility_pct()
            .or(self.default_volatility_pct)
            .unwrap_or(DEFAULT_FALLBACK_VOLATILITY_PCT)
    }
}

/// Lookup table of known tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    profiles: Vec<TokenProfile>,
}

impl TokenCatalog {
    pub fn new(profiles: Vec<TokenProfile>) -> Self {
        Self { profiles }
    }

    /// Built-in table. Reference prices are coarse snapshots, only good
    /// enough to keep a simulation running while the feed is down.
    pub fn builtin() -> Self {
        use AssetClass::*;
        Self::new(vec![
            TokenProfile::new("bitcoin", "BTC", Major).with_reference_price(65_000.0),
            TokenProfile::new("ethereum", "ETH", Major).with_reference_price(3_200.0),
            TokenProfile::new("solana", "SOL", Major).with_reference_price(150.0),
            TokenProfile::new("binancecoin", "BNB", Major).with_reference_price(580.0),
            TokenProfile::new("uniswap", "UNI", DefiBlueChip).with_reference_price(8.0),
            TokenProfile::new("aave", "AAVE", DefiBlueChip).with_reference_price(150.0),
            TokenProfile::new("chainlink", "LINK", DefiBlueChip).with_reference_price(14.0),
            TokenProfile::new("maker", "MKR", DefiBlueChip).with_reference_price(1_800.0),
            TokenProfile::new("lido-dao", "LDO", DefiBlueChip).with_reference_price(1.5),
            TokenProfile::new("curve-dao-token", "CRV", DefiBlueChip).with_reference_price(0.35),
            TokenProfile::new("arbitrum", "ARB", Layer2).with_reference_price(0.8),
            TokenProfile::new("optimism", "OP", Layer2).with_reference_price(1.7),
            TokenProfile::new("matic-network", "MATIC", Layer2).with_reference_price(0.5),
            TokenProfile::new("usd-coin", "USDC", Stable)
                .with_default_volatility(1.0)
                .with_reference_price(1.0),
            TokenProfile::new("tether", "USDT", Stable)
                .with_default_volatility(1.0)
                .with_reference_price(1.0),
        ])
    }

    pub fn get(&self, id: &TokenId) -> Option<&TokenProfile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    /// Known profile, or an unclassified one for unknown tokens.
    pub fn profile_or_default(&self, id: &TokenId) -> TokenProfile {
        self.get(id).cloned().unwrap_or_else(|| TokenProfile {
            id: id.clone(),
            symbol: id.as_str().to_ascii_uppercase(),
            asset_class: AssetClass::Other,
            default_volatility_pct: None,
            reference_price: None,
        })
    }

    pub fn reference_price(&self, id: &TokenId) -> Option<f64> {
        self.get(id).and_then(|p| p.reference_price)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_fallbacks() {
        let catalog = TokenCatalog::builtin();
        let vol = |id: &str| {
            catalog
                .profile_or_default(&TokenId::new(id))
                .fallback_volatility_pct()
        };
        assert_eq!(vol("ethereum"), 50.0);
        assert_eq!(vol("aave"), 65.0);
        assert_eq!(vol("arbitrum"), 75.0);
        assert_eq!(vol("usd-coin"), 1.0);
        assert_eq!(vol("some-new-token"), 80.0);
    }

    #[test]
    fn test_token_id_normalized() {
        assert_eq!(TokenId::new("  Ethereum "), TokenId::from("ethereum"));
        let catalog = TokenCatalog::builtin();
        assert_eq!(catalog.reference_price(&"ETHEREUM".into()), Some(3_200.0));
        assert_eq!(catalog.reference_price(&"unknown".into()), None);
    }

    #[test]
    fn test_own_default_used_for_unclassified() {
        let profile = TokenProfile::new("pepe", "PEPE", AssetClass::Other).with_default_volatility(120.0);
        assert_eq!(profile.fallback_volatility_pct(), 120.0);
    }
}
