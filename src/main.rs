use anyhow::bail;
use chrono::Utc;
use clap::Parser;
use property_finder::cli::Cli;
use property_finder::config::Config;
use property_finder::logging::setup_logging;
use property_finder::models::{ListingRecord, SearchReport};
use property_finder::search::{NestoriaClient, SearchController, SearchCriteria, SearchOutcome};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::from_cli(&args.settings)?;
    setup_logging(config.log_level);

    info!("🏠 Property Finder");

    let client = NestoriaClient::with_config(&config)?;
    let mut controller = SearchController::new(config.api_base_url.as_str());

    for (field, value) in args.criteria_inputs() {
        controller.update_field(field, value)?;
    }

    match controller.search(&client).await {
        SearchOutcome::Success(listings) => {
            show_results(&config, controller.criteria(), listings).await
        }
        SearchOutcome::Failure(message) => {
            error!("{}", message);
            bail!(message)
        }
        // `search` settles its own submission, so it is never superseded here
        SearchOutcome::Superseded => bail!("Search was superseded before it completed"),
    }
}

/// Results view: print the listings and save them alongside the criteria
async fn show_results(
    config: &Config,
    criteria: &SearchCriteria,
    listings: Vec<ListingRecord>,
) -> anyhow::Result<()> {
    info!("\n✅ Found {} listings\n", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        let title = listing.field("title").unwrap_or_else(|| "Untitled".to_string());
        let price = listing.field("price_formatted").unwrap_or_default();
        println!("{}. {} ({})", i + 1, title, price);
        if let Some(bedrooms) = listing.field("bedroom_number") {
            println!("   {} bedrooms", bedrooms);
        }
        if let Some(url) = listing.field("lister_url") {
            println!("   URL: {}", url);
        }
        println!();
    }

    let report = SearchReport {
        criteria: criteria.clone(),
        searched_at: Utc::now(),
        listings,
    };
    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&config.output, json).await?;
    info!("💾 Saved listings to {}", config.output.display());

    Ok(())
}
