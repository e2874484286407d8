//! # Command Handlers
//!
//! Each handler takes loaded config plus parsed arguments and returns the
//! text to print. Nothing here writes to stdout directly.

use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use freight_core::validation::validate_quote_input;
use freight_core::{Engine, QuoteInput, QuoteResult};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::cli::{OutputFormat, QuoteArgs};
use crate::config::{MarketDefaults, QuoteConfig};
use crate::error::{CliError, CliResult};

/// JSON output of the quote command.
#[derive(Debug, Serialize)]
pub struct QuoteEnvelope<'a> {
    pub generated_at: DateTime<Utc>,
    pub request: &'a QuoteInput,
    pub result: &'a QuoteResult,
}

// =============================================================================
// quote
// =============================================================================

/// Prices the request named by `args.input`.
pub fn quote(config: &QuoteConfig, args: &QuoteArgs) -> CliResult<String> {
    let raw = read_request(&args.input)?;
    let request = build_request(&raw, &config.market, args)?;
    validate_quote_input(&request, &config.tables)?;

    let engine = Engine::new(config.tables.clone())?;
    let result = engine.quote(&request);
    info!(
        total = %result.total_quote,
        zone = %result.zone_key,
        warnings = result.warnings.len(),
        "Quote complete"
    );

    match args.format {
        OutputFormat::Json => render_json(&request, &result, Utc::now()),
        OutputFormat::Text => Ok(render_text(&request, &result)),
    }
}

fn read_request(input: &str) -> CliResult<String> {
    if input == "-" {
        debug!("Reading request from stdin");
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(CliError::Stdin)?;
        return Ok(buf);
    }

    let path = PathBuf::from(input);
    debug!(?path, "Reading request file");
    std::fs::read_to_string(&path).map_err(|source| CliError::Read { path, source })
}

/// Parses request JSON, filling market fields the request leaves out and
/// then applying flag overrides.
pub fn build_request(
    raw: &str,
    defaults: &MarketDefaults,
    args: &QuoteArgs,
) -> CliResult<QuoteInput> {
    let mut value: Value = serde_json::from_str(raw).map_err(CliError::RequestParse)?;
    if let Value::Object(fields) = &mut value {
        fill_missing(fields, "fx_rate", defaults.fx_rate);
        fill_missing(fields, "fuel_surcharge_pct", defaults.fuel_surcharge_pct);
        fill_missing(fields, "margin_pct", defaults.margin_pct);
    }

    let mut request: QuoteInput = serde_json::from_value(value).map_err(CliError::RequestParse)?;
    if let Some(fx) = args.fx_rate {
        request.fx_rate = fx;
    }
    if let Some(fuel) = args.fuel_pct {
        request.fuel_surcharge_pct = fuel;
    }
    if let Some(margin) = args.margin {
        request.margin_pct = margin;
    }
    Ok(request)
}

fn fill_missing(fields: &mut Map<String, Value>, key: &str, default: f64) {
    let missing = fields.get(key).map_or(true, Value::is_null);
    if missing {
        debug!(key, default, "Using market default");
        fields.insert(key.to_string(), Value::from(default));
    }
}

/// Renders the JSON envelope.
pub fn render_json(
    request: &QuoteInput,
    result: &QuoteResult,
    generated_at: DateTime<Utc>,
) -> CliResult<String> {
    let envelope = QuoteEnvelope {
        generated_at,
        request,
        result,
    };
    serde_json::to_string_pretty(&envelope).map_err(CliError::Render)
}

/// Renders a human-readable summary.
pub fn render_text(request: &QuoteInput, result: &QuoteResult) -> String {
    let b = &result.breakdown;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} -> {} ({}) via {}",
        request.trade_term,
        request.origin_country,
        request.destination_country,
        result.applied_zone,
        result.carrier
    );
    let _ = writeln!(
        out,
        "Weight: actual {:.1}kg, volumetric {:.1}kg, billable {:.1}kg",
        result.actual_weight, result.volumetric_weight, result.billable_weight
    );
    let _ = writeln!(out, "Truck: {}", result.truck_tier);
    let _ = writeln!(out, "Transit: {}", result.transit_time);
    let _ = writeln!(out);

    let lines = [
        ("Domestic pickup", b.domestic_base),
        ("Remote pickup", b.domestic_surcharge),
        ("Packing material", b.packing_material),
        ("Packing labor", b.packing_labor),
        ("Fumigation", b.packing_fumigation),
        ("Handling", b.handling_fees),
        ("Freight", b.carrier_base),
        ("Fuel surcharge", b.carrier_fuel),
        ("War risk", b.carrier_war_risk),
        ("Carrier surcharges", b.carrier_surcharge),
        ("Duty", b.destination_duty),
    ];
    for (label, amount) in lines.iter().filter(|(_, amount)| *amount > 0.0) {
        let _ = writeln!(out, "  {:<20}{:>14.0}", label, amount);
    }
    let _ = writeln!(out, "  {:<20}{:>14.0}", "Total cost", b.total_cost);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Quote: {} (USD {:.2}), margin {:.1}%, profit {:.0}",
        result.total_quote, result.total_quote_usd, result.profit_margin, result.profit
    );

    if !result.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &result.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }
    out
}

// =============================================================================
// zone / tables
// =============================================================================

/// Resolves a destination to its zone.
pub fn zone(config: &QuoteConfig, country: &str, postal: &str) -> CliResult<String> {
    let engine = Engine::new(config.tables.clone())?;
    let zone = engine.classify_zone(country, postal);
    Ok(format!("{}\t{}", zone.key, zone.label))
}

/// Dumps the effective configuration.
pub fn tables(config: &QuoteConfig) -> CliResult<String> {
    config.to_toml()
}
