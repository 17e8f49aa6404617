pub mod scraper_origin;

pub use scraper_origin::{detect_scraper_origin, ScraperOrigin, FROM_SCRAPER_HEADER};
