//! Command-line and environment configuration for a scrape run.

use std::time::Duration;

use clap::Parser;

use crate::driver::DriverConfig;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Scrape actuarylist.com and post every job to the jobs API.
#[derive(Parser, Debug, Clone)]
#[command(name = "scrape_jobs")]
pub struct ScraperConfig {
    /// Listing site to start from
    #[arg(long, env = "ACTUARY_BASE_URL", default_value = "https://www.actuarylist.com")]
    pub base_url: String,

    /// Jobs API create endpoint
    #[arg(long, env = "JOBS_API_ENDPOINT", default_value = "http://localhost:5000/jobs")]
    pub api_endpoint: String,

    /// Stop after processing this many job cards
    #[arg(long, default_value_t = 100)]
    pub max_jobs: usize,

    /// Wait this long for job cards after each page load
    #[arg(long, default_value_t = 10_000)]
    pub settle_timeout_ms: u64,

    /// Poll interval while waiting for job cards
    #[arg(long, default_value_t = 250)]
    pub poll_interval_ms: u64,

    /// Pause between job posts
    #[arg(long, default_value_t = 500)]
    pub post_delay_ms: u64,

    /// User agent sent to the listing site
    #[arg(long, env = "SCRAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-page load timeout
    #[arg(long, default_value_t = 30)]
    pub page_load_timeout_secs: u64,
}

impl ScraperConfig {
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            start_url: self.base_url.clone(),
            max_jobs: self.max_jobs,
            settle_timeout: Duration::from_millis(self.settle_timeout_ms),
            post_delay: Duration::from_millis(self.post_delay_ms),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}
