//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_sim_domain::prelude::*;
//! ```

// Entities
pub use crate::entities::{AssetClass, TokenCatalog, TokenId, TokenProfile};

// Enums
pub use crate::enums::{RangeMode, SpotSource};

// Errors
pub use crate::error::{InvalidRangeError, InvalidReason, LiquidityError};

// Math
pub use crate::math::concentrated_liquidity::LiquidityPosition;
pub use crate::math::statistics::annualized_volatility_pct;

// Metrics
pub use crate::metrics::{
    HodlBaseline, ImpermanentLoss, calculate_break_even_apr, calculate_period_fees,
};

// Value objects
pub use crate::value_objects::{
    Price, PricePoint, PriceRange, PriceSeries, SimulationInput, VolatilityResult,
    VolatilitySource, VolatilityStatus,
};
