//! Lookup mode
//!
//! Resolves one address through the configured cache and database, then
//! prints the record as JSON.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::get_config;
use crate::runtime::lifetime::startup::create_metrics;
use crate::services::geoip::{GeoResolver, Resolution};

pub async fn run_lookup(ip: &str) -> Result<()> {
    let config = get_config();

    let resolver = GeoResolver::from_config(&config, create_metrics())
        .map_err(|e| anyhow::anyhow!(e.format_simple()))
        .context("Failed to initialize GeoIP2 resolver")?;

    match resolver.resolve(ip).await {
        Resolution::Resolved(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Resolution::Unknown(record) => {
            eprintln!("{} {}", "Address not found:".yellow(), ip.blue());
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Resolution::Failed => {
            anyhow::bail!("GeoIP2 lookup failed for {}", ip);
        }
    }

    Ok(())
}
