pub mod token;

// Re-export for easier access
pub use token::{AssetClass, TokenCatalog, TokenId, TokenProfile};
