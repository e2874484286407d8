//! # freight-quote
//!
//! Command-line front end for the freight-core pricing engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        freight-quote                                    │
//! │                                                                         │
//! │  args ──► QuoteConfig::load ──► command ──► freight-core ──► stdout     │
//! │                  │                                                      │
//! │      defaults ◄──┴──► TOML file ◄──► FREIGHT_* env                      │
//! │                                                                         │
//! │  logs ──► stderr (RUST_LOG, or --verbose for debug)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::QuoteConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing. stdout is reserved for command output.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = QuoteConfig::load(cli.config.clone())?;
    info!(
        fx_rate = config.market.fx_rate,
        fuel_surcharge_pct = config.market.fuel_surcharge_pct,
        margin_pct = config.market.margin_pct,
        "Configuration loaded"
    );

    let output = match &cli.command {
        Commands::Quote(args) => commands::quote(&config, args)?,
        Commands::Zone { country, postal } => commands::zone(&config, country, postal)?,
        Commands::Tables => commands::tables(&config)?,
    };
    println!("{}", output);

    Ok(())
}
