//! Simulation entry points.
//!
//! [`simulate`] is the pure core: identical inputs always give an identical
//! [`Report`]. [`SimulationFacade`] wraps it with the market-data steps
//! (spot price, volatility estimation, range suggestion).

use crate::analyzer::ImpermanentLossAnalyzer;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::range::{VolPeriod, suggest_range};
use crate::report::{Composition, DataQuality, Report, ReportContext, SimulationWarning};
use crate::scenario::ScenarioProjector;
use crate::volatility::VolatilityEstimator;
use lp_sim_data::{PriceFeed, PriceFeedError};
use lp_sim_domain::entities::{TokenCatalog, TokenId};
use lp_sim_domain::enums::{RangeMode, SpotSource};
use lp_sim_domain::value_objects::simulation_input::{MAX_VOLATILITY_PCT, MIN_VOLATILITY_PCT};
use lp_sim_domain::value_objects::{PriceRange, SimulationInput, VolatilityResult, VolatilityStatus};
use tracing::{debug, info, warn};

/// Runs one simulation over validated market inputs.
///
/// # Errors
/// Returns [`SimulationError::InvalidRange`] when `input` breaks the input
/// contract and [`SimulationError::DegenerateLiquidity`] when the range
/// cannot hold liquidity.
pub fn simulate(
    input: &SimulationInput,
    context: &ReportContext,
    config: &SimulationConfig,
) -> Result<Report, SimulationError> {
    input.validate()?;

    let projector = ScenarioProjector::new(input)?;
    let analyzer = ImpermanentLossAnalyzer::new(input);
    let vol_period = VolPeriod::new(input.volatility_pct, input.days);

    let scenarios = projector.project(vol_period, &analyzer);
    let curve = projector.curve(config.curve_points, config.curve_padding, &analyzer);
    let break_even_apr = analyzer.break_even_apr(&scenarios);

    let mut warnings = context.warnings.clone();
    let zero_hodl = curve.iter().any(|p| p.hodl_value == 0.0)
        || scenarios.high.hodl_value == 0.0
        || scenarios.low.hodl_value == 0.0;
    if zero_hodl && !warnings.contains(&SimulationWarning::ZeroHodlValue) {
        warnings.push(SimulationWarning::ZeroHodlValue);
    }

    let position = projector.position();
    let multiplier = projector.lp_multiplier();
    let (volatile, stable) = position.composition_pct();

    debug!(
        liquidity = position.liquidity,
        break_even_apr = break_even_apr,
        "Simulation complete"
    );

    Ok(Report {
        liquidity: position.liquidity * multiplier,
        token0_amount: position.token0_amount * multiplier,
        token1_amount: position.token1_amount * multiplier,
        composition_pct: Composition { volatile, stable },
        curve,
        scenarios,
        break_even_apr,
        period_fees: analyzer.period_fees(),
        volatility: context.volatility.clone(),
        spot_price: input.spot_price,
        range: input.range(),
        range_mode: context.range_mode,
        vol_period,
        data_quality: DataQuality {
            spot: context.spot_source,
            volatility: context.volatility.status,
        },
        warnings,
    })
}

/// How the range of a request is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RangeSelection {
    /// Suggest from spot price and volatility.
    #[default]
    Auto,
    /// Use the given bounds as is.
    Manual { lower: f64, upper: f64 },
}

impl RangeSelection {
    /// The matching [`RangeMode`].
    #[must_use]
    pub fn mode(&self) -> RangeMode {
        match self {
            Self::Auto => RangeMode::Auto,
            Self::Manual { .. } => RangeMode::Manual,
        }
    }
}

/// A simulation request before market data is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub token: TokenId,
    pub principal: f64,
    pub days: u32,
    pub expected_apr: f64,
    pub range: RangeSelection,
    /// Skips estimation when set.
    pub volatility_override: Option<f64>,
    /// Skips the spot price request when set.
    pub spot_override: Option<f64>,
}

impl SimulationRequest {
    /// Creates an auto-range request that resolves all market data.
    pub fn new(token: impl Into<TokenId>, principal: f64, days: u32, expected_apr: f64) -> Self {
        Self {
            token: token.into(),
            principal,
            days,
            expected_apr,
            range: RangeSelection::Auto,
            volatility_override: None,
            spot_override: None,
        }
    }

    #[must_use]
    pub fn with_manual_range(mut self, lower: f64, upper: f64) -> Self {
        self.range = RangeSelection::Manual { lower, upper };
        self
    }

    #[must_use]
    pub fn with_volatility(mut self, volatility_pct: f64) -> Self {
        self.volatility_override = Some(volatility_pct);
        self
    }

    #[must_use]
    pub fn with_spot(mut self, spot_price: f64) -> Self {
        self.spot_override = Some(spot_price);
        self
    }
}

/// Resolves market data through a [`PriceFeed`] and runs [`simulate`].
pub struct SimulationFacade<F> {
    feed: F,
    estimator: VolatilityEstimator,
    catalog: TokenCatalog,
    config: SimulationConfig,
}

impl<F: PriceFeed> SimulationFacade<F> {
    /// Creates a facade over `feed` with the built-in token catalog.
    pub fn new(feed: F, config: SimulationConfig) -> Self {
        let catalog = TokenCatalog::builtin();
        Self {
            feed,
            estimator: VolatilityEstimator::from_config(&config, catalog.clone()),
            catalog,
            config,
        }
    }

    /// Replaces the token catalog used for fallbacks.
    #[must_use]
    pub fn with_catalog(mut self, catalog: TokenCatalog) -> Self {
        self.estimator = VolatilityEstimator::from_config(&self.config, catalog.clone());
        self.catalog = catalog;
        self
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Fetches the spot price, falling back to the catalog reference price.
    ///
    /// # Errors
    /// Returns [`SimulationError::PriceFeedUnavailable`] when the feed fails
    /// and the token has no reference price.
    pub async fn resolve_spot(&self, token: &TokenId) -> Result<(f64, SpotSource), SimulationError> {
        let error = match self.feed.fetch_spot_price(token).await {
            Ok(price) if price.is_finite() && price > 0.0 => return Ok((price, SpotSource::Live)),
            Ok(price) => PriceFeedError::Decode(format!("unusable spot price {price}")),
            Err(err) => err,
        };

        match self.catalog.reference_price(token) {
            Some(price) => {
                warn!(token = %token, error = %error, price, "Spot price feed failed, using reference price");
                Ok((price, SpotSource::Estimated))
            }
            None => Err(SimulationError::PriceFeedUnavailable {
                token: token.clone(),
                source: error,
            }),
        }
    }

    /// Runs the estimation chain for `token`. Never fails.
    pub async fn estimate_volatility(&self, token: &TokenId) -> VolatilityResult {
        self.estimator.estimate(&self.feed, token).await
    }

    /// Resolves market data for `request` and simulates it.
    ///
    /// # Errors
    /// See [`simulate`] and [`Self::resolve_spot`].
    pub async fn run(&self, request: &SimulationRequest) -> Result<Report, SimulationError> {
        let (input, context) = self.prepare(request).await?;
        simulate(&input, &context, &self.config)
    }

    /// Resolves market data for `request` into a validated input and the
    /// provenance of its figures.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidRange`] for inputs outside the
    /// contract and [`SimulationError::PriceFeedUnavailable`] when no spot
    /// price can be found.
    pub async fn prepare(
        &self,
        request: &SimulationRequest,
    ) -> Result<(SimulationInput, ReportContext), SimulationError> {
        let token = &request.token;
        let (spot_price, spot_source) = match request.spot_override {
            Some(price) => (price, SpotSource::UserInput),
            None => self.resolve_spot(token).await?,
        };

        let mut warnings = Vec::new();
        if spot_source == SpotSource::Estimated {
            warnings.push(SimulationWarning::EstimatedSpotPrice);
        }

        let volatility = match request.volatility_override {
            Some(value) => VolatilityResult::user_input(value),
            None => {
                let mut estimate = self.estimate_volatility(token).await;
                if estimate.status == VolatilityStatus::Fallback {
                    warnings.push(SimulationWarning::EstimatedVolatility);
                }
                let clamped = estimate.value_pct.clamp(MIN_VOLATILITY_PCT, MAX_VOLATILITY_PCT);
                if clamped != estimate.value_pct {
                    warn!(
                        token = %token,
                        from = estimate.value_pct,
                        to = clamped,
                        "Volatility estimate out of bounds, clamping"
                    );
                    warnings.push(SimulationWarning::VolatilityClamped {
                        from: estimate.value_pct,
                        to: clamped,
                    });
                    estimate.value_pct = clamped;
                }
                estimate
            }
        };

        let range = match request.range {
            RangeSelection::Auto => suggest_range(spot_price, volatility.value_pct, request.days)?,
            RangeSelection::Manual { lower, upper } => PriceRange::try_new(lower, upper)?,
        };

        let input = SimulationInput::try_new(
            request.principal,
            request.days,
            volatility.value_pct,
            request.expected_apr,
            spot_price,
            range,
        )?;

        info!(
            token = %token,
            spot_price,
            spot_source = ?spot_source,
            volatility_pct = volatility.value_pct,
            volatility_source = %volatility.source,
            lower = range.lower(),
            upper = range.upper(),
            "Running simulation"
        );

        let context = ReportContext {
            volatility,
            spot_source,
            range_mode: request.range.mode(),
            warnings,
        };
        Ok((input, context))
    }
}
