//! Test doubles for the driver's browser and sink.
//!
//! `FixtureBrowser` serves canned pages keyed by URL and records what the
//! driver did with them. `RecordingSink` keeps every job it is handed.
//!
//! # Example
//!
//! ```rust,ignore
//! use actuary_scraper::testing::{FixtureBrowser, RecordingSink};
//!
//! let mut browser = FixtureBrowser::new()
//!     .with_page("https://jobs.test/", page_one_html)
//!     .with_page("https://jobs.test/?page=2", page_two_html);
//! let sink = RecordingSink::new();
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;

use crate::api_client::JobSink;
use crate::browser::{Browser, Page};
use crate::error::{BrowserError, BrowserResult, Result, ScrapeError};
use crate::extract::ScrapedJob;

fn normalize(url: &str) -> BrowserResult<String> {
    Url::parse(url)
        .map(String::from)
        .map_err(|_| BrowserError::InvalidUrl {
            url: url.to_string(),
        })
}

/// In-memory browser over canned pages.
#[derive(Default)]
pub struct FixtureBrowser {
    pages: HashMap<String, String>,
    /// Failed element checks before a freshly loaded page "renders"
    render_checks: usize,
    poll_interval: Duration,
    page: Option<Page>,
    pending_checks: usize,
    navigations: Vec<String>,
    clicks: Vec<String>,
    wait_checks: usize,
    close_calls: usize,
    closed: bool,
}

impl FixtureBrowser {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Serve `html` at `url`.
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        let key = normalize(url).unwrap_or_else(|_| url.to_string());
        self.pages.insert(key, html.into());
        self
    }

    /// Make every loaded page fail `checks` element checks before its content shows.
    pub fn with_render_delay(mut self, checks: usize) -> Self {
        self.render_checks = checks;
        self
    }

    /// URLs passed to `navigate`.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Selectors passed to successful `click` calls.
    pub fn clicks(&self) -> &[String] {
        &self.clicks
    }

    /// Element checks performed by `wait_for`.
    pub fn wait_checks(&self) -> usize {
        self.wait_checks
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn open(&self) -> BrowserResult<()> {
        if self.closed {
            return Err(BrowserError::Closed);
        }
        Ok(())
    }

    fn page(&self) -> BrowserResult<&Page> {
        self.open()?;
        self.page.as_ref().ok_or(BrowserError::NoPage)
    }

    fn load(&mut self, url: &str) -> BrowserResult<()> {
        let key = normalize(url)?;
        let html = self
            .pages
            .get(&key)
            .cloned()
            .ok_or_else(|| BrowserError::Status {
                url: key.clone(),
                status: 404,
            })?;
        let parsed = Url::parse(&key).map_err(|_| BrowserError::InvalidUrl { url: key.clone() })?;

        self.page = Some(Page::new(parsed, html));
        self.pending_checks = self.render_checks;
        Ok(())
    }
}

#[async_trait]
impl Browser for FixtureBrowser {
    async fn navigate(&mut self, url: &str) -> BrowserResult<()> {
        self.open()?;
        self.navigations.push(url.to_string());
        self.load(url)
    }

    async fn page_source(&self) -> BrowserResult<String> {
        Ok(self.page()?.html().to_string())
    }

    fn current_url(&self) -> Option<String> {
        self.page.as_ref().map(|page| page.url().to_string())
    }

    async fn is_enabled(&self, selector: &str) -> BrowserResult<bool> {
        self.page()?.is_enabled(selector)
    }

    async fn click(&mut self, selector: &str) -> BrowserResult<()> {
        let target = self.page()?.link_target(selector)?;
        self.load(target.as_str())?;
        self.clicks.push(selector.to_string());
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> BrowserResult<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            self.wait_checks += 1;
            if self.pending_checks > 0 {
                self.pending_checks -= 1;
            } else if self.page()?.contains(selector)? {
                return Ok(true);
            }

            if Instant::now() + self.poll_interval > deadline {
                return Ok(false);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn close(&mut self) -> BrowserResult<()> {
        self.close_calls += 1;
        self.closed = true;
        Ok(())
    }
}

/// Sink that records jobs instead of sending them anywhere.
#[derive(Default)]
pub struct RecordingSink {
    posted: Mutex<Vec<ScrapedJob>>,
    attempts: Mutex<usize>,
    failing_titles: HashSet<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject jobs with this title as the API would reject a bad payload.
    pub fn failing_on(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    /// Jobs accepted so far, in order.
    pub fn posted(&self) -> Vec<ScrapedJob> {
        self.posted.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }

    /// Every `post_job` call, accepted or not.
    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|n| *n).unwrap_or_default()
    }
}

#[async_trait]
impl JobSink for RecordingSink {
    async fn post_job(&self, job: &ScrapedJob) -> Result<()> {
        if let Ok(mut attempts) = self.attempts.lock() {
            *attempts += 1;
        }

        if self.failing_titles.contains(&job.title) {
            return Err(ScrapeError::Api {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }

        if let Ok(mut posted) = self.posted.lock() {
            posted.push(job.clone());
        }
        Ok(())
    }
}
