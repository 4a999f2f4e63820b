//! Lattice CLI - Command Line Binomial Option Pricing
//!
//! # Commands
//!
//! - `lattice price` - Price one contract with the configured estimator
//! - `lattice converge` - Price one contract over a list of step counts
//! - `lattice demo` - Price the five-step textbook scenario
//! - `lattice check` - Print the effective configuration
//!
//! # Configuration
//!
//! `lattice.toml` (or `--config`), then `LATTICE_*` environment variables,
//! then command-line flags. `RUST_LOG` overrides the configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lattice_pricing::LatticeMethod;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::ContractArgs;
use config::{build_config, CliOverrides, LogLevel, OutputFormat};

const DEFAULT_CONFIG: &str = "lattice.toml";

/// Binomial lattice option pricer
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug log level)
    #[arg(long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Number of lattice steps
    #[arg(short = 'n', long, global = true)]
    steps: Option<usize>,

    /// Continuously compounded risk-free rate
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Estimator (plain, averaged, hybrid, richardson)
    #[arg(short, long, global = true)]
    method: Option<LatticeMethod>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one contract
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Also report Delta, Gamma and Theta
        #[arg(short, long)]
        greeks: bool,
    },

    /// Convergence study over step counts
    Converge {
        #[command(flatten)]
        contract: ContractArgs,

        /// Comma-separated step counts
        #[arg(long, value_delimiter = ',', default_value = "10,25,50,100,250,500,1000")]
        grid: Vec<usize>,

        /// Also report Delta, Gamma and Theta
        #[arg(short, long)]
        greeks: bool,
    },

    /// Price the five-step textbook scenario
    Demo,

    /// Print the effective configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        steps: cli.steps,
        rate: cli.rate,
        method: cli.method,
        log_level: cli.log_level.or(cli.verbose.then_some(LogLevel::Debug)),
        format: cli.format,
    };
    let (path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    let config = build_config(&path, explicit, |key| std::env::var(key).ok(), &overrides)?;

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    debug!(?config, "Configuration loaded");

    let stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Price { contract, greeks } => {
            commands::price::run(&config, &contract, greeks, stdout)
        }
        Commands::Converge {
            contract,
            grid,
            greeks,
        } => commands::converge::run(&config, &contract, &grid, greeks, stdout),
        Commands::Demo => commands::demo::run(config.format, stdout),
        Commands::Check => commands::check::run(&config, stdout),
    }
}
