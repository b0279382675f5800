use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use lp_sim_data::providers::FixturePriceFeed;
use lp_sim_domain::entities::{TokenCatalog, TokenId};
use lp_sim_domain::enums::RangeMode;
use lp_sim_domain::math::concentrated_liquidity::value_at_price;
use lp_sim_domain::value_objects::{PricePoint, PriceSeries, SimulationInput, VolatilityStatus};
use lp_sim_simulation::prelude::*;
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = SimulationInput> {
    (
        1.0f64..1e7,    // principal
        1u32..=365,     // days
        1.0f64..200.0,  // volatility
        0.0f64..500.0,  // apr
        1e-2f64..1e4,   // lower bound
        1e-3f64..5.0,   // relative width
        0.1f64..10.0,   // spot relative to lower
    )
        .prop_map(|(principal, days, volatility_pct, expected_apr, lower, width, spot)| {
            SimulationInput {
                principal,
                days,
                volatility_pct,
                expected_apr,
                spot_price: lower * spot,
                price_low: lower,
                price_high: lower * (1.0 + width),
            }
        })
}

proptest! {
    #[test]
    fn value_is_continuous_at_bounds(
        liquidity in 1e-3f64..1e6,
        lower in 1e-3f64..1e5,
        width in 1e-3f64..10.0,
    ) {
        let upper = lower * (1.0 + width);
        let (sl, su) = (lower.sqrt(), upper.sqrt());
        for bound in [lower, upper] {
            let at = value_at_price(liquidity, bound, sl, su);
            let below = value_at_price(liquidity, bound * (1.0 - 1e-10), sl, su);
            let above = value_at_price(liquidity, bound * (1.0 + 1e-10), sl, su);
            assert_relative_eq!(below, at, max_relative = 1e-6);
            assert_relative_eq!(above, at, max_relative = 1e-6);
        }
    }

    #[test]
    fn lp_value_equals_principal_at_spot(input in input_strategy()) {
        let projector = ScenarioProjector::new(&input).unwrap();
        assert_relative_eq!(projector.lp_value(input.spot_price), input.principal, max_relative = 1e-9);
        assert_relative_eq!(projector.hodl_value(input.spot_price), input.principal, max_relative = 1e-9);
    }

    #[test]
    fn break_even_apr_is_non_negative(input in input_strategy()) {
        let context = ReportContext::user_input(input.volatility_pct, RangeMode::Manual);
        let report = simulate(&input, &context, &SimulationConfig::default()).unwrap();
        prop_assert!(report.break_even_apr >= 0.0);
        prop_assert!(report.period_fees >= 0.0);
        prop_assert_eq!(report.curve.len(), 51);
    }

    #[test]
    fn suggested_range_brackets_spot(
        spot in 1e-6f64..1e6,
        volatility in 1e-3f64..1000.0,
        days in 1u32..=3650,
    ) {
        let range = suggest_range(spot, volatility, days).unwrap();
        prop_assert!(range.lower() > 0.0);
        prop_assert!(range.lower() < spot);
        prop_assert!(spot < range.upper());
    }

    #[test]
    fn short_history_never_succeeds(points in 0usize..5) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series = PriceSeries::from_points(
            (0..points)
                .map(|i| PricePoint::new(start + Duration::days(i as i64), 100.0 + i as f64))
                .collect(),
        );
        let feed = FixturePriceFeed::new().with_history("solana", series);
        let estimator =
            VolatilityEstimator::from_config(&SimulationConfig::default(), TokenCatalog::builtin());

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result = runtime.block_on(estimator.estimate(&feed, &TokenId::new("solana")));
        prop_assert_eq!(result.status, VolatilityStatus::Fallback);
    }
}
