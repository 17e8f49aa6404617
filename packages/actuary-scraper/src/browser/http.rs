//! Plain HTTP browser.
//!
//! Fetches documents with reqwest and "clicks" by following link targets.
//! Waiting for an element re-fetches the current page until it shows up.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use super::{Browser, Page};
use crate::error::{BrowserError, BrowserResult};

/// Browser backed by a reqwest client.
///
/// # Example
///
/// ```rust,ignore
/// use actuary_scraper::browser::{Browser, HttpBrowser};
///
/// let mut browser = HttpBrowser::new("Mozilla/5.0", Duration::from_secs(30))?;
/// browser.navigate("https://www.actuarylist.com").await?;
/// let html = browser.page_source().await?;
/// ```
pub struct HttpBrowser {
    client: reqwest::Client,
    poll_interval: Duration,
    page: Option<Page>,
    closed: bool,
}

impl HttpBrowser {
    /// Create a session sending `user_agent`, with `timeout` per page load.
    pub fn new(user_agent: &str, timeout: Duration) -> BrowserResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Use a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            poll_interval: Duration::from_millis(250),
            page: None,
            closed: false,
        }
    }

    /// Delay between re-fetches while waiting for an element.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
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

    async fn fetch(&self, url: Url) -> BrowserResult<Page> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            BrowserError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Keep the final URL after redirects
        let final_url = response.url().clone();
        let html = response.text().await?;
        debug!(url = %final_url, bytes = html.len(), "HTTP fetch complete");

        Ok(Page::new(final_url, html))
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    async fn navigate(&mut self, url: &str) -> BrowserResult<()> {
        self.open()?;
        let url = Url::parse(url).map_err(|_| BrowserError::InvalidUrl {
            url: url.to_string(),
        })?;
        self.page = Some(self.fetch(url).await?);
        Ok(())
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
        debug!(selector, target = %target, "Following link");
        self.page = Some(self.fetch(target).await?);
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> BrowserResult<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let url = {
                let page = self.page()?;
                if page.contains(selector)? {
                    return Ok(true);
                }
                page.url().clone()
            };

            if Instant::now() + self.poll_interval > deadline {
                return Ok(false);
            }
            tokio::time::sleep(self.poll_interval).await;
            debug!(url = %url, selector, "Re-fetching page while waiting");
            self.page = Some(self.fetch(url).await?);
        }
    }

    async fn close(&mut self) -> BrowserResult<()> {
        self.closed = true;
        self.page = None;
        Ok(())
    }
}
