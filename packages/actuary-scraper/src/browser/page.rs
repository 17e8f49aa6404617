//! Queries over one loaded document, shared by every static browser.
//!
//! The document is kept as text and parsed per query, so a `Page` can be held
//! across `.await` points.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{BrowserError, BrowserResult};

/// A loaded document and the URL it was served from.
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    html: String,
}

pub(crate) fn parse_selector(selector: &str) -> BrowserResult<Selector> {
    Selector::parse(selector).map_err(|_| BrowserError::InvalidSelector {
        selector: selector.to_string(),
    })
}

/// `disabled` attribute, `aria-disabled="true"`, or a `disabled` class.
fn is_disabled(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    value.attr("disabled").is_some()
        || value
            .attr("aria-disabled")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        || value.classes().any(|class| class == "disabled")
}

impl Page {
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether any element matches `selector`.
    pub fn contains(&self, selector: &str) -> BrowserResult<bool> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        let found = document.select(&selector).next().is_some();
        Ok(found)
    }

    /// Whether the first element matching `selector` exists and is enabled.
    pub fn is_enabled(&self, selector: &str) -> BrowserResult<bool> {
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        let enabled = document
            .select(&parsed)
            .next()
            .is_some_and(|element| !is_disabled(&element));
        Ok(enabled)
    }

    /// Where clicking the first element matching `selector` leads.
    ///
    /// Links resolve their `href` against the page URL; other elements resolve
    /// through the first link they contain.
    pub fn link_target(&self, selector: &str) -> BrowserResult<Url> {
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        let element = document
            .select(&parsed)
            .next()
            .ok_or_else(|| BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })?;

        let not_clickable = || BrowserError::NotClickable {
            selector: selector.to_string(),
        };
        if is_disabled(&element) {
            return Err(not_clickable());
        }

        let href = match element.value().attr("href") {
            Some(href) => href,
            None => {
                let link = parse_selector("a[href]")?;
                element
                    .select(&link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .ok_or_else(not_clickable)?
            }
        };

        let href = href.trim();
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            return Err(not_clickable());
        }

        self.url.join(href).map_err(|_| BrowserError::InvalidUrl {
            url: href.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> Page {
        Page::new(Url::parse("https://www.actuarylist.com/jobs?page=1").unwrap(), html)
    }

    #[test]
    fn detects_presence() {
        let page = page(r#"<div class="Job_job-card__YgDAV">one</div>"#);
        assert!(page.contains("div.Job_job-card__YgDAV").unwrap());
        assert!(!page.contains("div.missing").unwrap());
    }

    #[test]
    fn rejects_invalid_selectors() {
        let err = page("<p></p>").contains("div[").unwrap_err();
        assert!(matches!(err, BrowserError::InvalidSelector { .. }));
    }

    #[test]
    fn disabled_markers_are_respected() {
        let page = page(
            r#"
            <a class="a" href="/a">a</a>
            <button class="b" disabled>b</button>
            <a class="c" aria-disabled="true" href="/c">c</a>
            <a class="d disabled" href="/d">d</a>
            "#,
        );
        assert!(page.is_enabled("a.a").unwrap());
        assert!(!page.is_enabled("button.b").unwrap());
        assert!(!page.is_enabled("a.c").unwrap());
        assert!(!page.is_enabled("a.d").unwrap());
        assert!(!page.is_enabled("a.missing").unwrap());
    }

    #[test]
    fn link_targets_resolve_against_page_url() {
        let page = page(
            r#"
            <a rel="next" href="?page=2">Next</a>
            <li class="next"><a href="https://www.actuarylist.com/jobs?page=3">3</a></li>
            <button class="wrapper"><a href="/jobs?page=4">4</a></button>
            <button class="plain">Load more</button>
            "#,
        );

        assert_eq!(
            page.link_target("a[rel='next']").unwrap().as_str(),
            "https://www.actuarylist.com/jobs?page=2"
        );
        assert_eq!(
            page.link_target("li.next > a").unwrap().as_str(),
            "https://www.actuarylist.com/jobs?page=3"
        );
        assert_eq!(
            page.link_target("button.wrapper").unwrap().as_str(),
            "https://www.actuarylist.com/jobs?page=4"
        );
        assert!(matches!(
            page.link_target("button.plain").unwrap_err(),
            BrowserError::NotClickable { .. }
        ));
        assert!(matches!(
            page.link_target("a.next").unwrap_err(),
            BrowserError::ElementNotFound { .. }
        ));
    }
}
