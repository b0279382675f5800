//! Provider configuration loaded from the environment.

use std::env;
use std::time::Duration;

/// Public CoinGecko API root.
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Settings for [`crate::providers::CoinGeckoProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinGeckoConfig {
    /// API root without trailing slash.
    pub base_url: String,
    /// Demo API key, sent as `x-cg-demo-api-key`.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl CoinGeckoConfig {
    /// Reads `COINGECKO_BASE_URL`, `COINGECKO_API_KEY` and
    /// `COINGECKO_TIMEOUT_SECS`, keeping defaults for unset or invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("COINGECKO_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_key: lookup("COINGECKO_API_KEY").filter(|v| !v.trim().is_empty()),
            timeout_secs: lookup("COINGECKO_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_defaults() {
        let config = CoinGeckoConfig::from_lookup(|_| None);
        assert_eq!(config, CoinGeckoConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("COINGECKO_BASE_URL", "https://pro-api.coingecko.com/api/v3/"),
            ("COINGECKO_API_KEY", "demo-key"),
            ("COINGECKO_TIMEOUT_SECS", "not-a-number"),
        ]);
        let config = CoinGeckoConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://pro-api.coingecko.com/api/v3");
        assert_eq!(config.api_key.as_deref(), Some("demo-key"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
