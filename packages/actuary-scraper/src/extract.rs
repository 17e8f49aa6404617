//! Listing extraction: one page of markup in, raw job records out.
//!
//! Every field is best-effort. A missing element leaves the field empty or
//! defaulted and never aborts the record or the page.

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::dates::parse_relative_date;
use crate::error::{Result, ScrapeError};

/// Job card container on actuarylist.com.
pub const RECORD_SELECTOR: &str = "div.Job_job-card__YgDAV";

/// Tried in order when the card selector matches nothing.
const FALLBACK_RECORD_SELECTORS: &[&str] = &[
    "div[class*='job-']",
    ".job-listing",
    ".job-item",
    ".job-card",
    ".job",
];

/// A fallback selector must match at least this many elements to be trusted.
const MIN_FALLBACK_MATCHES: usize = 5;

const TITLE_SELECTOR: &str = "p.Job_job-card__position__ic1rc";
const FEATURED_PIN_SELECTOR: &str = "p.Job_job-card__pin__N5sZd";
const COMPANY_SELECTOR: &str = "p.Job_job-card__company__7T9qY";
const LOCATION_SELECTOR: &str =
    "div.Job_job-card__locations__x1exr a.Job_job-card__location__bq7jX";
const POSTED_ON_SELECTOR: &str = "span.Job_job-card__posted-on__NCZaJ";
const DATE_FALLBACK_SELECTORS: &[&str] = &[
    ".date",
    ".posted-date",
    ".job-date",
    "time",
    ".publish-date",
    ".date-column",
    "[class*='date']",
    "[class*='posted']",
];
const JOB_LINK_SELECTOR: &str = "a.Job_job-page-link__a5I5g";
const TAG_SELECTORS: &[&str] = &[
    ".tag",
    ".badge",
    ".label",
    ".chip",
    ".skill",
    "[class*='tag']",
    "[class*='badge']",
    "[class*='skill']",
    ".category",
    ".keyword",
    ".requirement",
];

/// Location used when a card lists no usable location.
pub const LOCATION_NOT_SPECIFIED: &str = "Remote/Not specified";

pub const MAX_TAGS: usize = 8;

/// Keywords recognized anywhere in a card's text.
const TAG_VOCABULARY: &[&str] = &[
    "Life",
    "Health",
    "P&C",
    "Property",
    "Casualty",
    "Python",
    "R",
    "SQL",
    "Excel",
    "VBA",
    "SAS",
    "Pricing",
    "Reserving",
    "Valuation",
    "Risk Management",
    "ASA",
    "FSA",
    "Fellow",
    "Associate",
    "Analyst",
    "ACAS",
    "FCAS",
    "Actuarial",
    "Insurance",
    "Reinsurance",
];

/// Salary and similar chips share the location list.
const CURRENCY_GLYPHS: &[char] = &['💰', '💵', '💲', '$', '€', '£'];

/// Job type keywords, checked in order against lowercased card text.
const JOB_TYPE_RULES: &[(&str, &str)] = &[
    (r"\b(?:intern|internship)\b", "Internship"),
    (r"\b(?:part-time|part time|contract)\b", "Part-Time"),
    (r"\b(?:temporary|temp)\b", "Contract"),
];

pub const DEFAULT_JOB_TYPE: &str = "Full-Time";

/// One job card as read from the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posting_date: NaiveDate,
    pub job_type: String,
    pub tags: Vec<String>,
    pub job_url: Option<String>,
}

impl ScrapedJob {
    /// Cards without a title or company are not worth posting.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.company.is_empty()
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector(selector.to_string()))
}

fn compile_all(selectors: &[&str]) -> Result<Vec<Selector>> {
    selectors.iter().map(|s| compile(s)).collect()
}

/// Whitespace-collapsed text of an element.
fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Matches strictly inside `scope`, in document order.
fn select_within<'a>(
    scope: ElementRef<'a>,
    selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    scope
        .select(selector)
        .filter(move |element| element.id() != scope.id())
}

fn is_flag(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

struct Selectors {
    records: Selector,
    fallback_records: Vec<Selector>,
    title: Selector,
    featured_pin: Selector,
    company: Selector,
    location: Selector,
    posted_on: Selector,
    date_fallbacks: Vec<Selector>,
    job_link: Selector,
    tags: Vec<Selector>,
}

impl Selectors {
    fn compile() -> Result<Self> {
        Ok(Self {
            records: compile(RECORD_SELECTOR)?,
            fallback_records: compile_all(FALLBACK_RECORD_SELECTORS)?,
            title: compile(TITLE_SELECTOR)?,
            featured_pin: compile(FEATURED_PIN_SELECTOR)?,
            company: compile(COMPANY_SELECTOR)?,
            location: compile(LOCATION_SELECTOR)?,
            posted_on: compile(POSTED_ON_SELECTOR)?,
            date_fallbacks: compile_all(DATE_FALLBACK_SELECTORS)?,
            job_link: compile(JOB_LINK_SELECTOR)?,
            tags: compile_all(TAG_SELECTORS)?,
        })
    }
}

/// Reads job cards out of listing markup.
///
/// # Example
///
/// ```rust,ignore
/// let extractor = ListingExtractor::new(Url::parse("https://www.actuarylist.com")?)?;
/// for job in extractor.extract(&html, Utc::now().date_naive()) {
///     println!("{} at {}", job.title, job.company);
/// }
/// ```
pub struct ListingExtractor {
    base_url: Url,
    record_wait_selector: String,
    selectors: Selectors,
    job_types: Vec<(Regex, &'static str)>,
    vocabulary: Vec<(Regex, &'static str)>,
}

impl ListingExtractor {
    /// Extractor resolving relative job links against `base_url`.
    pub fn new(base_url: Url) -> Result<Self> {
        let job_types = JOB_TYPE_RULES
            .iter()
            .map(|(pattern, label)| Ok((Regex::new(pattern)?, *label)))
            .collect::<Result<Vec<_>>>()?;

        let vocabulary = TAG_VOCABULARY
            .iter()
            .map(|term| {
                let pattern = format!(r"\b{}\b", regex::escape(&term.to_uppercase()));
                Ok((Regex::new(&pattern)?, *term))
            })
            .collect::<Result<Vec<_>>>()?;

        let record_wait_selector = std::iter::once(RECORD_SELECTOR)
            .chain(FALLBACK_RECORD_SELECTORS.iter().copied())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            base_url,
            record_wait_selector,
            selectors: Selectors::compile()?,
            job_types,
            vocabulary,
        })
    }

    /// Selector list matching any element that could hold a job card.
    ///
    /// Presence is enough to stop waiting; the fallback match threshold is
    /// applied at extraction time.
    pub fn record_wait_selector(&self) -> &str {
        &self.record_wait_selector
    }

    /// Every job card on the page, valid or not.
    pub fn extract(&self, html: &str, today: NaiveDate) -> Vec<ScrapedJob> {
        let document = Html::parse_document(html);
        self.record_elements(&document)
            .into_iter()
            .map(|record| self.extract_record(record, today))
            .collect()
    }

    fn record_elements<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let records: Vec<_> = document.select(&self.selectors.records).collect();
        if !records.is_empty() {
            debug!(count = records.len(), "Found job cards with primary selector");
            return records;
        }

        for (selector, name) in self
            .selectors
            .fallback_records
            .iter()
            .zip(FALLBACK_RECORD_SELECTORS)
        {
            let records: Vec<_> = document.select(selector).collect();
            if records.len() >= MIN_FALLBACK_MATCHES {
                debug!(count = records.len(), selector = name, "Found job cards with fallback selector");
                return records;
            }
        }

        Vec::new()
    }

    fn extract_record(&self, record: ElementRef<'_>, today: NaiveDate) -> ScrapedJob {
        let text = element_text(record);
        let posting_date = self
            .date_text(record)
            .map(|date| parse_relative_date(&date, today))
            .unwrap_or(today);

        ScrapedJob {
            title: self.title(record),
            company: self.first_text(record, &self.selectors.company),
            location: self.location(record),
            posting_date,
            job_type: self.job_type(&text).to_string(),
            tags: self.tags(record, &text),
            job_url: self.job_url(record),
        }
    }

    fn first_text(&self, record: ElementRef<'_>, selector: &Selector) -> String {
        select_within(record, selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    /// Position text without the nested "Featured" marker.
    fn title(&self, record: ElementRef<'_>) -> String {
        let Some(title) = select_within(record, &self.selectors.title).next() else {
            return String::new();
        };

        let mut pieces = Vec::new();
        for node in title.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let in_pin = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != title.id())
                .filter_map(ElementRef::wrap)
                .any(|ancestor| self.selectors.featured_pin.matches(&ancestor));
            if !in_pin {
                pieces.push(&**text);
            }
        }

        collapse_whitespace(&pieces.join(" "))
    }

    fn location(&self, record: ElementRef<'_>) -> String {
        let locations: Vec<String> = select_within(record, &self.selectors.location)
            .map(element_text)
            .filter(|location| {
                location
                    .chars()
                    .next()
                    .is_some_and(|c| !CURRENCY_GLYPHS.contains(&c) && !is_flag(c))
            })
            .collect();

        if locations.is_empty() {
            LOCATION_NOT_SPECIFIED.to_string()
        } else {
            locations.join(", ")
        }
    }

    fn date_text(&self, record: ElementRef<'_>) -> Option<String> {
        std::iter::once(&self.selectors.posted_on)
            .chain(self.selectors.date_fallbacks.iter())
            .filter_map(|selector| select_within(record, selector).next())
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    fn job_url(&self, record: ElementRef<'_>) -> Option<String> {
        let href = select_within(record, &self.selectors.job_link)
            .next()?
            .value()
            .attr("href")?
            .trim();
        if href.is_empty() {
            return None;
        }
        self.base_url.join(href).ok().map(String::from)
    }

    /// Job type label for a card's text.
    pub fn job_type(&self, text: &str) -> &'static str {
        let text = text.to_lowercase();
        self.job_types
            .iter()
            .find(|(pattern, _)| pattern.is_match(&text))
            .map(|(_, label)| *label)
            .unwrap_or(DEFAULT_JOB_TYPE)
    }

    /// Tag chips on the card first, then vocabulary hits; deduplicated, capped.
    fn tags(&self, record: ElementRef<'_>, text: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        let mut push = |tag: String| {
            if tags.len() < MAX_TAGS && !tags.contains(&tag) {
                tags.push(tag);
            }
        };

        for selector in &self.selectors.tags {
            for element in select_within(record, selector) {
                let tag = element_text(element);
                let len = tag.chars().count();
                if len > 2 && len < 30 {
                    push(tag);
                }
            }
        }

        let upper = text.to_uppercase();
        for (pattern, term) in &self.vocabulary {
            if pattern.is_match(&upper) {
                push(term.to_string());
            }
        }

        tags
    }
}
