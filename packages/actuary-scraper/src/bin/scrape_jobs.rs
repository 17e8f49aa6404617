// Scrape actuarylist.com and post the jobs to the jobs API

use actuary_scraper::{scrape_and_post, ScraperConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actuary_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ScraperConfig::parse();
    tracing::info!(base_url = %config.base_url, api = %config.api_endpoint, "Starting scraper");

    let summary = scrape_and_post(&config).await;

    // Summary goes to stdout as JSON; logs go to stderr
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{json}");

    if summary.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
