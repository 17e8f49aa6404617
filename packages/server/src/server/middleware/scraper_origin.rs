use axum::{extract::Request, middleware::Next, response::Response};

/// Header the scraper sets on every job it posts
pub const FROM_SCRAPER_HEADER: &str = "x-from-scraper";

/// Extension key recording whether the request came from the scraper
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScraperOrigin(pub bool);

/// Middleware to detect the scraper marker header
///
/// Always inserts a `ScraperOrigin` so handlers can extract it unconditionally.
/// Accepts `true` or `1`, case-insensitive.
pub async fn detect_scraper_origin(mut request: Request, next: Next) -> Response {
    let from_scraper = request
        .headers()
        .get(FROM_SCRAPER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.trim();
            value.eq_ignore_ascii_case("true") || value == "1"
        })
        .unwrap_or(false);

    request
        .extensions_mut()
        .insert(ScraperOrigin(from_scraper));

    next.run(request).await
}
