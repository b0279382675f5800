use serde::{Deserialize, Serialize};

/// How the simulated price range is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    /// Range follows the volatility-based suggestion.
    #[default]
    Auto,
    /// A bound was edited by hand; suggestions are ignored until reset.
    Manual,
}

/// Origin of the spot price used for a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotSource {
    /// Fetched from the price feed.
    Live,
    /// Static reference price, used because the feed failed.
    Estimated,
    /// Supplied by the caller.
    UserInput,
}
