//! Valuer CLI - equity valuation from historical statements
//!
//! # Commands
//!
//! - `valuer value --data <file>` - Five-year DCF value per share
//! - `valuer sensitivity --data <file>` - WACC by terminal-growth grid
//! - `valuer simulate --data <file>` - Monte Carlo price distribution
//! - `valuer health --data <file>` - Ratios, ratings and health score
//! - `valuer fcfe --data <file>` - Free cash flow to equity value per share
//! - `valuer ddm --data <file>` - Dividend discount model prices
//! - `valuer relative --data <file> --peers <file>` - Peer-multiple prices
//! - `valuer wacc ...` - CAPM cost of capital
//!
//! Configuration is layered: CLI flags over `VALUER_*` environment
//! variables over a TOML file over built-in defaults.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use service_cli::commands;
use service_cli::config::{build_config, CliArgs as ConfigCliArgs};
use service_cli::commands::ddm::GrowthProfile;
use service_cli::loader::{load_dataset, load_peers, parse_overrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use valuation_core::{CapmInputs, WaccInputs};
use valuation_fundamentals::relative::{PeerStatistic, RelativeTargets};
use valuation_pricing::ddm::{
    DEFAULT_DECLINE_YEARS, DEFAULT_HIGH_GROWTH, DEFAULT_HIGH_GROWTH_YEARS, DEFAULT_STABLE_GROWTH,
};
use valuation_risk::ParallelConfig;

/// Equity valuation engine
#[derive(Parser, Debug)]
#[command(name = "valuer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "VALUER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (json, table)
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Path to the dataset JSON file
    #[arg(short, long, value_name = "FILE")]
    data: PathBuf,

    /// Assumption override, repeatable (e.g. --set wacc=0.095)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[derive(Args, Debug)]
struct CapmArgs {
    /// Risk-free rate
    #[arg(long, default_value_t = 0.03)]
    risk_free: f64,

    /// Equity beta
    #[arg(long, default_value_t = 0.8)]
    beta: f64,

    /// Equity market risk premium
    #[arg(long, default_value_t = 0.10)]
    premium: f64,
}

impl From<CapmArgs> for CapmInputs {
    fn from(args: CapmArgs) -> Self {
        CapmInputs {
            risk_free: args.risk_free,
            beta: args.beta,
            market_premium: args.premium,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Value the company with a five-year DCF
    Value {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Re-value over a 5x5 WACC by terminal-growth grid
    Sensitivity {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Sample the value-per-share distribution
    Simulate {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Number of trials
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Analyse ratios and score financial health
    Health {
        /// Path to the dataset JSON file
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        /// Fiscal year to analyse (defaults to the latest)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Value equity from projected free cash flow to equity
    Fcfe {
        /// Path to the dataset JSON file
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        #[command(flatten)]
        capm: CapmArgs,
    },

    /// Price a share with the dividend discount models
    Ddm {
        /// Path to the dataset JSON file
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        #[command(flatten)]
        capm: CapmArgs,

        /// Initial dividend growth rate
        #[arg(long, default_value_t = DEFAULT_HIGH_GROWTH)]
        high_growth: f64,

        /// Perpetual dividend growth rate
        #[arg(long, default_value_t = DEFAULT_STABLE_GROWTH)]
        stable_growth: f64,

        /// Years of high growth (two-stage model)
        #[arg(long, default_value_t = DEFAULT_HIGH_GROWTH_YEARS)]
        high_growth_years: u32,

        /// Years over which growth declines (H-model)
        #[arg(long, default_value_t = DEFAULT_DECLINE_YEARS)]
        decline_years: f64,
    },

    /// Value against peer P/E, P/B and EV/EBITDA multiples
    Relative {
        /// Path to the dataset JSON file
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        /// Path to the peer multiples JSON file
        #[arg(short, long, value_name = "FILE")]
        peers: PathBuf,

        /// Use the peer median instead of the mean
        #[arg(long)]
        median: bool,

        /// Fixed target P/E
        #[arg(long)]
        pe: Option<f64>,

        /// Fixed target P/B
        #[arg(long)]
        pb: Option<f64>,

        /// Fixed target EV/EBITDA
        #[arg(long)]
        ev_ebitda: Option<f64>,
    },

    /// Compute WACC from CAPM inputs
    Wacc {
        /// Risk-free rate
        #[arg(long)]
        risk_free: f64,

        /// Equity beta
        #[arg(long)]
        beta: f64,

        /// Equity market risk premium
        #[arg(long)]
        premium: f64,

        /// Pre-tax cost of debt
        #[arg(long, default_value_t = 0.0)]
        cost_of_debt: f64,

        /// Target debt-to-equity ratio
        #[arg(long, default_value_t = 0.0)]
        debt_to_equity: f64,

        /// Marginal tax rate
        #[arg(long, default_value_t = 0.0)]
        tax_rate: f64,
    },
}

impl From<&Cli> for ConfigCliArgs {
    fn from(cli: &Cli) -> Self {
        let (iterations, seed) = match &cli.command {
            Commands::Simulate {
                iterations, seed, ..
            } => (*iterations, *seed),
            _ => (None, None),
        };
        ConfigCliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            output: cli.output.clone(),
            iterations,
            seed,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&ConfigCliArgs::from(&cli)).context("invalid configuration")?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());

    tracing::debug!(
        version = service_cli::VERSION,
        iterations = config.iterations,
        seed = ?config.seed,
        parallel_threshold = config.parallel_threshold,
        output = %config.output,
        "configuration loaded"
    );

    let format = config.output;
    let rendered = match cli.command {
        Commands::Value { dataset } => {
            let data = load_dataset(&dataset.data)?;
            let overrides = parse_overrides(&dataset.set)?;
            commands::value::run(&data, &overrides, format)?
        }
        Commands::Sensitivity { dataset } => {
            let data = load_dataset(&dataset.data)?;
            let overrides = parse_overrides(&dataset.set)?;
            let parallel = ParallelConfig::new(config.parallel_threshold);
            commands::sensitivity::run(&data, &overrides, &parallel, format)?
        }
        Commands::Simulate { dataset, .. } => {
            let data = load_dataset(&dataset.data)?;
            let overrides = parse_overrides(&dataset.set)?;
            commands::simulate::run(&data, &overrides, config.simulation()?, config.seed, format)?
        }
        Commands::Health { data, year } => {
            let data = load_dataset(&data)?;
            commands::health::run(&data, year, format)?
        }
        Commands::Fcfe { data, capm } => {
            let data = load_dataset(&data)?;
            commands::fcfe::run(&data, &capm.into(), format)?
        }
        Commands::Ddm {
            data,
            capm,
            high_growth,
            stable_growth,
            high_growth_years,
            decline_years,
        } => {
            let data = load_dataset(&data)?;
            let profile = GrowthProfile {
                high_growth,
                stable_growth,
                high_growth_years,
                decline_years,
            };
            commands::ddm::run(&data, &capm.into(), &profile, format)?
        }
        Commands::Relative {
            data,
            peers,
            median,
            pe,
            pb,
            ev_ebitda,
        } => {
            let data = load_dataset(&data)?;
            let peers = load_peers(&peers)?;
            let targets = RelativeTargets {
                statistic: if median {
                    PeerStatistic::Median
                } else {
                    PeerStatistic::Mean
                },
                pe,
                pb,
                ev_ebitda,
            };
            commands::relative::run(&data, &peers, &targets, format)?
        }
        Commands::Wacc {
            risk_free,
            beta,
            premium,
            cost_of_debt,
            debt_to_equity,
            tax_rate,
        } => {
            let inputs = WaccInputs {
                risk_free,
                beta,
                market_premium: premium,
                cost_of_debt,
                debt_to_equity,
                tax_rate,
            };
            commands::wacc::run(&inputs, format)?
        }
    };

    println!("{}", rendered);
    Ok(())
}
