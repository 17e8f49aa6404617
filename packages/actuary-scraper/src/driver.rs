//! Ingestion driver: walks the listing pages and forwards each card to a sink.
//!
//! The run is a small state machine:
//!
//! ```text
//! LoadingPage -> ExtractingRecords -> PostingRecords -> AdvancingPage -> LoadingPage
//!                        |                   |                |
//!                        +-------------------+----------------+--> Done
//! ```
//!
//! Only a failure to load the first page ends the run with an error; every
//! other problem is logged and either skips the record or stops pagination.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api_client::JobSink;
use crate::browser::Browser;
use crate::error::BrowserResult;
use crate::extract::{ListingExtractor, ScrapedJob};

/// Consent buttons tried once after the first page load.
pub const COOKIE_SELECTORS: &[&str] = &[
    "button[class*='cookie']",
    "button[class*='consent']",
    "button[class*='accept']",
    "#cookie-accept",
    ".cookie-accept",
];

/// Pagination controls, in order of preference.
pub const NEXT_PAGE_SELECTORS: &[&str] = &[
    "a[rel='next']",
    "button[aria-label='Next']",
    ".pagination-next",
    "button.next",
    "a.next",
    "li.next > a",
    "li[aria-label='Next'] a",
];

/// Counts for one run. `error` is set only when the run could not start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    pub posted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// First listing page
    pub start_url: String,
    /// Cards to process (posted, failed or skipped) before stopping
    pub max_jobs: usize,
    /// How long to wait for job cards after each page load
    pub settle_timeout: Duration,
    /// Pause after each post
    pub post_delay: Duration,
}

impl DriverConfig {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            max_jobs: 100,
            settle_timeout: Duration::from_secs(10),
            post_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug)]
enum DriverState {
    LoadingPage { initial: bool },
    ExtractingRecords,
    PostingRecords(Vec<ScrapedJob>),
    AdvancingPage,
    Done,
}

pub struct IngestionDriver<'a, B: Browser + ?Sized, S: JobSink + ?Sized> {
    browser: &'a mut B,
    sink: &'a S,
    extractor: &'a ListingExtractor,
    config: DriverConfig,
    summary: ScrapeSummary,
    processed: usize,
    visited: HashSet<String>,
}

impl<'a, B: Browser + ?Sized, S: JobSink + ?Sized> IngestionDriver<'a, B, S> {
    pub fn new(
        browser: &'a mut B,
        sink: &'a S,
        extractor: &'a ListingExtractor,
        config: DriverConfig,
    ) -> Self {
        Self {
            browser,
            sink,
            extractor,
            config,
            summary: ScrapeSummary::default(),
            processed: 0,
            visited: HashSet::new(),
        }
    }

    /// Run to completion. The browser session is closed before returning.
    pub async fn run(mut self, today: NaiveDate) -> ScrapeSummary {
        info!(url = %self.config.start_url, max_jobs = self.config.max_jobs, "Starting scrape");

        if let Err(e) = self.drive(today).await {
            warn!(error = %e, "Scrape ended early");
            self.summary.error = Some(e.to_string());
        }

        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Failed to close browser session");
        }

        info!(
            posted = self.summary.posted,
            failed = self.summary.failed,
            skipped = self.summary.skipped,
            "Scraping completed"
        );
        self.summary
    }

    async fn drive(&mut self, today: NaiveDate) -> BrowserResult<()> {
        let mut state = DriverState::LoadingPage { initial: true };

        loop {
            state = match state {
                DriverState::LoadingPage { initial } => self.load_page(initial).await?,
                DriverState::ExtractingRecords => self.extract_records(today).await?,
                DriverState::PostingRecords(records) => self.post_records(records).await,
                DriverState::AdvancingPage => self.advance_page().await,
                DriverState::Done => return Ok(()),
            };
        }
    }

    async fn load_page(&mut self, initial: bool) -> BrowserResult<DriverState> {
        if initial {
            let start_url = self.config.start_url.clone();
            self.browser.navigate(&start_url).await?;
            self.dismiss_cookie_banner().await;
        }

        if let Some(url) = self.browser.current_url() {
            if !self.visited.insert(url.clone()) {
                info!(url = %url, "Pagination returned to a visited page, stopping");
                return Ok(DriverState::Done);
            }
        }

        let selector = self.extractor.record_wait_selector();
        match self
            .browser
            .wait_for(selector, self.config.settle_timeout)
            .await
        {
            Ok(true) => {}
            Ok(false) => debug!("Job cards did not appear before the settle timeout"),
            Err(e) => warn!(error = %e, "Waiting for job cards failed"),
        }

        Ok(DriverState::ExtractingRecords)
    }

    async fn dismiss_cookie_banner(&mut self) {
        for selector in COOKIE_SELECTORS {
            if !matches!(self.browser.is_enabled(selector).await, Ok(true)) {
                continue;
            }
            match self.browser.click(selector).await {
                Ok(()) => info!(selector, "Cookie consent handled"),
                Err(e) => debug!(selector, error = %e, "Cookie consent click failed"),
            }
            return;
        }
        debug!("No cookie consent control found");
    }

    async fn extract_records(&mut self, today: NaiveDate) -> BrowserResult<DriverState> {
        let html = self.browser.page_source().await?;
        let records = self.extractor.extract(&html, today);

        if records.is_empty() {
            info!("No job cards found on page, stopping");
            return Ok(DriverState::Done);
        }

        info!(count = records.len(), "Found job cards");
        Ok(DriverState::PostingRecords(records))
    }

    async fn post_records(&mut self, records: Vec<ScrapedJob>) -> DriverState {
        for job in records {
            if self.processed >= self.config.max_jobs {
                break;
            }
            self.processed += 1;

            if !job.is_valid() {
                self.summary.skipped += 1;
                debug!(title = %job.title, company = %job.company, "Skipped card missing title or company");
                continue;
            }

            match self.sink.post_job(&job).await {
                Ok(()) => {
                    self.summary.posted += 1;
                    info!(title = %job.title, company = %job.company, "Posted job");
                }
                Err(e) => {
                    self.summary.failed += 1;
                    warn!(title = %job.title, error = %e, "Failed to post job");
                }
            }

            if !self.config.post_delay.is_zero() {
                tokio::time::sleep(self.config.post_delay).await;
            }
        }

        if self.processed >= self.config.max_jobs {
            info!(processed = self.processed, "Reached job limit");
            DriverState::Done
        } else {
            DriverState::AdvancingPage
        }
    }

    async fn advance_page(&mut self) -> DriverState {
        let mut next = None;
        for selector in NEXT_PAGE_SELECTORS {
            match self.browser.is_enabled(selector).await {
                Ok(true) => {
                    next = Some(*selector);
                    break;
                }
                Ok(false) => {}
                Err(e) => debug!(selector, error = %e, "Next page check failed"),
            }
        }

        let Some(selector) = next else {
            info!("No enabled next page control, stopping pagination");
            return DriverState::Done;
        };

        match self.browser.click(selector).await {
            Ok(()) => {
                info!(selector, "Advanced to next page");
                DriverState::LoadingPage { initial: false }
            }
            Err(e) => {
                warn!(selector, error = %e, "Pagination error");
                DriverState::Done
            }
        }
    }
}
