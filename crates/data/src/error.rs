//! Price feed error types.

use lp_sim_domain::entities::TokenId;
use thiserror::Error;

/// Failure to obtain market data from a price feed.
#[derive(Debug, Error)]
pub enum PriceFeedError {
    /// Transport-level failure (DNS, TLS, timeout).
    #[error("price feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success HTTP status.
    #[error("price feed returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
    /// Response body did not match the expected shape.
    #[error("malformed price feed response: {0}")]
    Decode(String),
    /// The feed has no data for the token.
    #[error("no price data for token {0}")]
    NotFound(TokenId),
    /// The feed is unreachable or disabled.
    #[error("price feed unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for PriceFeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
