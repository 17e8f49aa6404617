//! Typed errors for the scraper library.

use thiserror::Error;

/// Errors raised by a [`Browser`](crate::browser::Browser) session.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Transport-level failure fetching a page
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Page answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("invalid selector: {selector}")]
    InvalidSelector { selector: String },

    /// Nothing on the current page matches the selector
    #[error("no element matches: {selector}")]
    ElementNotFound { selector: String },

    /// The element exists but cannot be clicked (disabled, or no link target)
    #[error("element is not clickable: {selector}")]
    NotClickable { selector: String },

    /// No page has been loaded yet
    #[error("no page loaded")]
    NoPage,

    /// The session was closed
    #[error("browser session closed")]
    Closed,
}

pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// Errors raised by the scraper outside the browser session.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Jobs API answered with a non-success status
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the jobs API
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
