//! Concentrated liquidity position simulation.
//!
//! This crate turns market inputs into a position [`report::Report`]:
//! - Volatility estimation with an ordered fallback chain
//! - Range suggestion and the auto/manual range mode
//! - Scenario projection and the value curve
//! - Impermanent loss, fee and break-even analysis
//! - The pure [`facade::simulate`] core and its async [`facade::SimulationFacade`]

/// Prelude module for convenient imports.
pub mod prelude;

/// Impermanent loss analysis.
pub mod analyzer;
/// Simulation configuration.
pub mod config;
/// Error types.
pub mod error;
/// Simulation entry points.
pub mod facade;
/// Synthetic price paths.
pub mod price_path;
/// Range suggestion.
pub mod range;
/// Position records.
pub mod record;
/// Report types.
pub mod report;
/// Scenario projection.
pub mod scenario;
/// Request generations.
pub mod session;
/// Volatility estimation.
pub mod volatility;
