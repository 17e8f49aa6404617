//! Scraper for actuarylist.com job listings.
//!
//! Loads the listing pages, reads every job card, and posts each valid card
//! to the jobs API create endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use actuary_scraper::{scrape_and_post, ScraperConfig};
//! use clap::Parser;
//!
//! let summary = scrape_and_post(&ScraperConfig::parse()).await;
//! println!("{}", serde_json::to_string(&summary)?);
//! ```

pub mod api_client;
pub mod browser;
pub mod config;
pub mod dates;
pub mod driver;
pub mod error;
pub mod extract;
pub mod testing;

pub use api_client::{JobSink, JobsApiClient};
pub use browser::{Browser, HttpBrowser};
pub use config::ScraperConfig;
pub use dates::parse_relative_date;
pub use driver::{DriverConfig, IngestionDriver, ScrapeSummary};
pub use error::{BrowserError, BrowserResult, Result, ScrapeError};
pub use extract::{ListingExtractor, ScrapedJob};

use chrono::Utc;
use tracing::error;
use url::Url;

/// Set up the HTTP browser, extractor and API client, then run the driver.
///
/// Setup failures are reported in the summary rather than returned.
pub async fn scrape_and_post(config: &ScraperConfig) -> ScrapeSummary {
    match setup(config) {
        Ok((mut browser, extractor, sink)) => {
            IngestionDriver::new(&mut browser, &sink, &extractor, config.driver_config())
                .run(Utc::now().date_naive())
                .await
        }
        Err(e) => {
            error!(error = %e, "Scraper setup failed");
            ScrapeSummary {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

fn setup(config: &ScraperConfig) -> Result<(HttpBrowser, ListingExtractor, JobsApiClient)> {
    let browser = HttpBrowser::new(&config.user_agent, config.page_load_timeout())?
        .with_poll_interval(config.poll_interval());
    let extractor = ListingExtractor::new(Url::parse(&config.base_url)?)?;
    let sink = JobsApiClient::new(config.api_endpoint.clone())?;
    Ok((browser, extractor, sink))
}
