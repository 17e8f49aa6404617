// Job Board - API Core
//
// CRUD REST API over job postings. Jobs arrive either directly through the
// API or from the actuary-scraper package, which re-posts listings it scrapes.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
