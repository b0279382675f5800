//! Domain model for concentrated liquidity position simulation.
//!
//! This crate holds the pure, I/O-free building blocks:
//! - Value objects: prices, ranges, price series, simulation inputs
//! - Token identities and the static fallback catalog
//! - Concentrated liquidity math (three-branch value function)
//! - Impermanent loss, fee accrual and break-even metrics
//! - Return statistics for historical volatility

/// Prelude module for convenient imports.
pub mod prelude;

/// Token entities and catalog.
pub mod entities;
/// Shared enums.
pub mod enums;
/// Error types.
pub mod error;
/// AMM and statistics math.
pub mod math;
/// IL and fee metrics.
pub mod metrics;
/// Value objects.
pub mod value_objects;
