//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "freight-quote", version, about = "International freight quote engine")]
pub struct Cli {
    /// Configuration file path (defaults to the per-user config file)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a shipment request
    Quote(QuoteArgs),

    /// Show which zone a destination resolves to
    Zone {
        /// ISO 3166-1 alpha-2 country code
        #[arg(long)]
        country: String,

        /// Destination postal code
        #[arg(long, default_value = "")]
        postal: String,
    },

    /// Print the effective rate tables as TOML
    Tables,
}

#[derive(clap::Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Request JSON file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Override the FX rate (local currency per USD)
    #[arg(long)]
    pub fx_rate: Option<f64>,

    /// Override the fuel surcharge percent
    #[arg(long)]
    pub fuel_pct: Option<f64>,

    /// Override the target margin percent
    #[arg(long)]
    pub margin: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}
