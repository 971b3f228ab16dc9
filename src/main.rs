#![allow(clippy::result_large_err)]

//! Availability check utility.
//!
//! Fetches one availability snapshot for a rental period and prints the
//! per-screen and per-equipment picture, the same numbers the dashboard
//! shows when quoting a period over the phone.

use chrono::NaiveDate;
use dotenvy::dotenv;
use screenbook::client::{Backend, RestBackend};
use screenbook::config::api::ApiConfig;
use screenbook::core::availability::{self, AvailabilityCache};
use screenbook::errors::{Error, Result};
use screenbook::models::{DateRange, EquipmentCategory};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Parse the requested period from the command line
    let mut args = std::env::args().skip(1);
    let (start, end) = match (args.next(), args.next()) {
        (Some(start), Some(end)) => (parse_date(&start)?, parse_date(&end)?),
        _ => {
            return Err(Error::Config {
                message: "Usage: screenbook <start-date> <end-date> (dates as YYYY-MM-DD)"
                    .to_string(),
            });
        }
    };
    let range = DateRange::new(start, end);

    // 4. Connect to the backend
    let api_config = ApiConfig::from_env()?;
    let backend = RestBackend::new(&api_config)?;
    info!("Using backend at {}.", api_config.base_url);

    // 5. Fetch the inventory names and one availability snapshot
    let inventory = backend.list_screen_inventory().await?;
    let cache = Arc::new(RwLock::new(AvailabilityCache::new()));
    availability::refresh_availability(&backend, &cache, range, None).await?;

    // 6. Print the per-screen and equipment picture
    let cache_reader = cache.read().await;
    println!("Availability {} to {}", range.start, range.end);
    println!("Screens:");
    for item in &inventory {
        match cache_reader.available_area_for(item.id) {
            Some(free) => println!(
                "  {}: {free}/{} sqm free",
                item.screen_type, item.total_sqm_owned
            ),
            None => println!("  {}: no availability data", item.screen_type),
        }
    }
    println!("Equipment:");
    for category in EquipmentCategory::ALL {
        if let (Some(available), Some(assigned)) = (
            cache_reader.available_count_for(category),
            cache_reader.assigned_count_for(category),
        ) {
            println!(
                "  {}: {available} free, {assigned} assigned",
                category.label()
            );
        }
    }

    Ok(())
}

/// Parses a YYYY-MM-DD command line argument.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| Error::Config {
        message: format!("Invalid date '{raw}', expected YYYY-MM-DD"),
    })
}
