//! Bulk CSV import for the provider directory.
//!
//! Reads a scraped CSV export, normalizes the messy cells (semicolon-joined
//! lists, currency-decorated numbers), and replaces the store contents in one
//! transaction.

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use shifa::{config::Config, logging, models::NewProvider, state::AppState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shifa-import", about = "Import providers from a CSV export")]
struct Args {
    /// Path to the CSV file to import
    #[arg(long, default_value = "data/providers.csv")]
    file: PathBuf,
}

/// One CSV row as exported by the scraper. Every cell is optional; the
/// normalizers below supply the defaults.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    profile_url: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    experience_years: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    modes: Option<String>,
    #[serde(default)]
    education: Option<String>,
    #[serde(default)]
    experience: Option<String>,
    #[serde(default)]
    expertise: Option<String>,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    fees_raw: Option<String>,
    #[serde(default)]
    fee_amount: Option<String>,
    #[serde(default)]
    fee_currency: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_simple_logging();

    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let records = read_csv(&args.file)
        .with_context(|| format!("Failed to read CSV at {}", args.file.display()))?;
    tracing::info!(rows = records.len(), file = %args.file.display(), "Loaded CSV");

    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;

    let inserted = state.store.replace_all(records).await?;
    tracing::info!(inserted, "Import complete");

    Ok(())
}

fn read_csv(path: &PathBuf) -> anyhow::Result<Vec<NewProvider>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize::<RawRow>() {
        let row = row?;
        records.push(row_to_provider(row));
    }

    Ok(records)
}

fn row_to_provider(row: RawRow) -> NewProvider {
    NewProvider {
        name: row
            .name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        profile_url: row.profile_url.unwrap_or_default(),
        gender: row.gender.unwrap_or_default(),
        city: row.city.unwrap_or_default(),
        experience_years: parse_number(row.experience_years.as_deref()).unwrap_or(0.0),
        email: row.email.unwrap_or_default(),
        phone: row.phone.unwrap_or_default(),
        modes: parse_list(row.modes.as_deref()),
        education: parse_semicolon_list(row.education.as_deref()),
        prior_roles: parse_semicolon_list(row.experience.as_deref()),
        specialties: parse_semicolon_list(row.expertise.as_deref()),
        about: row.about.unwrap_or_default(),
        fees_raw: row.fees_raw.unwrap_or_default(),
        fee_amount: parse_number(row.fee_amount.as_deref()).unwrap_or(0.0),
        fee_currency: row
            .fee_currency
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "PKR".to_string()),
    }
}

/// Split a free-form list cell on any of `;`, `,`, `|`, or newline.
fn parse_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split([';', ',', '|', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a semicolon-joined cell, tolerating surrounding quotes left over
/// from the export.
fn parse_semicolon_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let cleaned = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    cleaned
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a number cell, ignoring currency symbols and thousands separators.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    digits.parse::<f64>().ok()
}
