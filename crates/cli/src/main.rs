//! Command Line Interface for the liquidity position simulator.
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lp_sim_data::prelude::*;
use lp_sim_domain::entities::{TokenCatalog, TokenId};
use lp_sim_simulation::prelude::*;
use prettytable::{Table, row};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Days of synthetic history generated for offline runs.
const OFFLINE_HISTORY_DAYS: usize = 90;

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "lp-sim")]
#[command(about = "Concentrated liquidity position simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a position over a holding period
    Simulate {
        /// Token id (e.g., ethereum)
        #[arg(short, long, default_value = "ethereum")]
        token: String,

        /// Capital in USD
        #[arg(short, long, default_value_t = 1000.0)]
        capital: f64,

        /// Holding period in days
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Expected fee APR in percent
        #[arg(long, default_value_t = 20.0)]
        apr: f64,

        /// Lower price bound (manual range, requires --upper)
        #[arg(long, requires = "upper")]
        lower: Option<f64>,

        /// Upper price bound (manual range, requires --lower)
        #[arg(long, requires = "lower")]
        upper: Option<f64>,

        /// Annualized volatility in percent, skips estimation
        #[arg(long)]
        volatility: Option<f64>,

        /// Spot price, skips the price request
        #[arg(long)]
        spot: Option<f64>,

        /// Use synthetic market data instead of CoinGecko
        #[arg(long)]
        offline: bool,

        /// Seed for synthetic market data
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Write the position record as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Estimate annualized volatility from daily history
    Volatility {
        /// Token id (e.g., ethereum)
        #[arg(short, long, default_value = "ethereum")]
        token: String,

        /// History windows in days, tried in order
        #[arg(long, value_delimiter = ',', default_value = "30,7,1")]
        windows: Vec<u32>,

        /// Use synthetic market data instead of CoinGecko
        #[arg(long)]
        offline: bool,

        /// Seed for synthetic market data
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Suggest a range from spot price and volatility
    SuggestRange {
        /// Spot price
        #[arg(long)]
        spot: f64,

        /// Annualized volatility in percent
        #[arg(long)]
        volatility: f64,

        /// Holding period in days
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },
}

/// Fixture feed serving a seeded GBM history around the token's reference
/// price. Unknown tokens without `--spot` get an empty feed.
fn offline_feed(
    catalog: &TokenCatalog,
    token: &TokenId,
    spot: Option<f64>,
    seed: u64,
) -> FixturePriceFeed {
    let profile = catalog.profile_or_default(token);
    let feed = FixturePriceFeed::new();
    let Some(price) = spot.or(profile.reference_price) else {
        return feed;
    };

    let start = Utc::now() - Duration::days(OFFLINE_HISTORY_DAYS as i64);
    let series = GeometricBrownianMotion::daily(price, profile.fallback_volatility_pct())
        .with_seed(seed)
        .generate_series(start, OFFLINE_HISTORY_DAYS);
    let last = series.last_price().unwrap_or(price);

    feed.with_spot(token.clone(), last)
        .with_history(token.clone(), series)
}

fn coingecko_feed() -> Result<CoinGeckoProvider> {
    let config = CoinGeckoConfig::from_env();
    info!(base_url = %config.base_url, "Using CoinGecko price feed");
    Ok(CoinGeckoProvider::new(config)?)
}

async fn run_simulation<F: PriceFeed>(
    feed: F,
    request: SimulationRequest,
    save: Option<PathBuf>,
) -> Result<()> {
    let facade = SimulationFacade::new(feed, SimulationConfig::default());

    println!("📡 Resolving market data for {}...", request.token);
    let (input, context) = facade.prepare(&request).await?;
    let report = simulate(&input, &context, facade.config())?;

    print_report(&request, &report);

    if let Some(path) = save {
        let record = PositionRecord::from_simulation(request.token.clone(), input, report)?;
        std::fs::write(&path, record.to_json_pretty()?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("💾 Saved record {} to {}", record.id, path.display());
    }

    Ok(())
}

fn print_report(request: &SimulationRequest, report: &Report) {
    let mut position = Table::new();
    position.set_titles(row!["Position", "Value"]);
    position.add_row(row!["Token", request.token]);
    position.add_row(row!["Capital", format!("${:.2}", request.principal)]);
    position.add_row(row!["Spot price", format!("{:.4}", report.spot_price)]);
    position.add_row(row![
        "Range",
        format!(
            "{:.4} - {:.4} ({:?})",
            report.range.lower(),
            report.range.upper(),
            report.range_mode
        )
    ]);
    position.add_row(row![
        "Volatility",
        format!(
            "{:.0}% ({}, {:?})",
            report.volatility.value_pct, report.volatility.source_tag, report.volatility.status
        )
    ]);
    position.add_row(row!["Liquidity", format!("{:.6}", report.liquidity)]);
    position.add_row(row![
        "Composition",
        format!(
            "{:.4} volatile / {:.2} stable ({:.1}% / {:.1}%)",
            report.token0_amount,
            report.token1_amount,
            report.composition_pct.volatile,
            report.composition_pct.stable
        )
    ]);
    position.add_row(row!["Period fees", format!("${:.2}", report.period_fees)]);
    position.add_row(row!["Break-even APR", format!("{:.2}%", report.break_even_apr)]);
    position.printstd();

    let mut scenarios = Table::new();
    scenarios.set_titles(row!["Scenario", "Price", "HODL", "LP", "LP + fees", "IL %", "IL $"]);
    for (name, s) in [("+1σ", &report.scenarios.high), ("-1σ", &report.scenarios.low)] {
        scenarios.add_row(row![
            name,
            format!("{:.4}", s.price),
            format!("{:.2}", s.hodl_value),
            format!("{:.2}", s.lp_value),
            format!("{:.2}", s.lp_value_with_fees),
            format!("{:.2}", s.il_pct),
            format!("{:.2}", s.il_dollar)
        ]);
    }
    scenarios.printstd();

    for warning in &report.warnings {
        println!("⚠️  {warning}");
    }
}

async fn run_volatility<F: PriceFeed>(feed: F, token: &TokenId, windows: Vec<u32>) -> Result<()> {
    let config = SimulationConfig::default().with_history_windows(windows);
    let estimator = VolatilityEstimator::from_config(&config, TokenCatalog::builtin());

    println!("🔍 Estimating volatility for {token}...");
    let result = estimator.estimate(&feed, token).await;

    let mut table = Table::new();
    table.set_titles(row!["Token", "Volatility", "Source", "Status"]);
    table.add_row(row![
        token,
        format!("{:.0}%", result.value_pct),
        result.source_tag,
        format!("{:?}", result.status)
    ]);
    table.printstd();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            token,
            capital,
            days,
            apr,
            lower,
            upper,
            volatility,
            spot,
            offline,
            seed,
            save,
        } => {
            let token = TokenId::new(token);
            let mut request = SimulationRequest::new(token.clone(), capital, days, apr);
            if let (Some(lower), Some(upper)) = (lower, upper) {
                request = request.with_manual_range(lower, upper);
            }
            if let Some(volatility) = volatility {
                request = request.with_volatility(volatility);
            }
            if let Some(spot) = spot {
                request = request.with_spot(spot);
            }

            if offline {
                let feed = offline_feed(&TokenCatalog::builtin(), &token, spot, seed);
                run_simulation(feed, request, save).await?;
            } else {
                run_simulation(coingecko_feed()?, request, save).await?;
            }
        }
        Commands::Volatility {
            token,
            windows,
            offline,
            seed,
        } => {
            let token = TokenId::new(token);
            if offline {
                let feed = offline_feed(&TokenCatalog::builtin(), &token, None, seed);
                run_volatility(feed, &token, windows).await?;
            } else {
                run_volatility(coingecko_feed()?, &token, windows).await?;
            }
        }
        Commands::SuggestRange {
            spot,
            volatility,
            days,
        } => {
            let range = suggest_range(spot, volatility, days)?;
            let period = VolPeriod::new(volatility, days);

            let mut table = Table::new();
            table.set_titles(row!["Spot", "Volatility", "Days", "Width", "Lower", "Upper"]);
            table.add_row(row![
                format!("{spot:.4}"),
                format!("{volatility:.1}%"),
                days,
                format!("±{:.0}%", period.range_width * 100.0),
                format!("{:.4}", range.lower()),
                format!("{:.4}", range.upper())
            ]);
            table.printstd();
        }
    }

    Ok(())
}
