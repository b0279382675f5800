//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_sim_simulation::prelude::*;
//! ```

// Analysis
pub use crate::analyzer::ImpermanentLossAnalyzer;

// Configuration
pub use crate::config::SimulationConfig;

// Errors
pub use crate::error::{EstimationError, RecordError, SimulationError};

// Facade
pub use crate::facade::{RangeSelection, SimulationFacade, SimulationRequest, simulate};

// Price path generators
pub use crate::price_path::{GeometricBrownianMotion, PricePathGenerator};

// Range suggestion
pub use crate::range::{RangeController, VolPeriod, suggest_range};

// Records
pub use crate::record::{PositionRecord, RecordSummary};

// Reports
pub use crate::report::{Composition, DataQuality, Report, ReportContext, SimulationWarning};

// Scenarios
pub use crate::scenario::{CurvePoint, ScenarioProjector, ScenarioResult, Scenarios};

// Sessions
pub use crate::session::{RequestGeneration, VolatilityRefresher};

// Volatility
pub use crate::volatility::{
    AssetClassification, HistoricalWindow, VolatilityEstimator, VolatilityTier,
};
