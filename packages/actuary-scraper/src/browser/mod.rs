//! Browser capability used by the ingestion driver.
//!
//! The driver only needs to load a page, read its markup, check and click
//! elements, and wait for content to show up. [`HttpBrowser`] does this over
//! plain HTTP; a JS-capable driver can implement the same trait.

pub mod http;
pub mod page;

pub use http::HttpBrowser;
pub use page::Page;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BrowserResult;

/// A single browsing session.
#[async_trait]
pub trait Browser: Send {
    /// Load `url`, replacing the current page.
    async fn navigate(&mut self, url: &str) -> BrowserResult<()>;

    /// Markup of the current page.
    async fn page_source(&self) -> BrowserResult<String>;

    /// URL of the current page, if one is loaded.
    fn current_url(&self) -> Option<String>;

    /// Whether the first element matching `selector` exists and can be clicked.
    async fn is_enabled(&self, selector: &str) -> BrowserResult<bool>;

    /// Click the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> BrowserResult<()>;

    /// Poll until an element matching `selector` is present or `timeout` passes.
    ///
    /// Returns whether the element showed up.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> BrowserResult<bool>;

    /// End the session. Further calls fail with `BrowserError::Closed`.
    async fn close(&mut self) -> BrowserResult<()>;
}
