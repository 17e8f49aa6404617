// Listing markup shared by the scraper tests
#![allow(dead_code)]

/// One job card in the site's markup.
pub fn card(title: &str, company: &str) -> String {
    format!(
        r#"<div class="Job_job-card__YgDAV">
             <a class="Job_job-page-link__a5I5g" href="/jobs/{slug}">
               <p class="Job_job-card__position__ic1rc">{title}</p>
               <p class="Job_job-card__company__7T9qY">{company}</p>
             </a>
             <div class="Job_job-card__locations__x1exr">
               <a class="Job_job-card__location__bq7jX">Remote</a>
             </div>
             <span class="Job_job-card__posted-on__NCZaJ">1 day ago</span>
           </div>"#,
        slug = title.to_lowercase().replace(' ', "-"),
    )
}

/// A listing page with the given cards and an optional next link.
pub fn listing(cards: &[String], next_href: Option<&str>) -> String {
    let next = next_href
        .map(|href| format!(r#"<a rel="next" href="{href}">Next</a>"#))
        .unwrap_or_default();
    format!("<html><body>{}{next}</body></html>", cards.concat())
}
