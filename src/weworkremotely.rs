use scraper::{ElementRef, Html, Selector};
use url::Url;
use log::debug;

use crate::extractor::{element_text, required_text, select_text, selector, RawJobRecord, SiteExtractor};
use crate::fetcher::PageSource;

pub const BASE_URL: &str = "https://weworkremotely.com";

/// WeWorkRemotely lists only a teaser per job; the description lives on
/// a detail page, fetched once per listing.
pub struct WeWorkRemotely {
    base_url: String,
    listing: Selector,
    title: Selector,
    company: Selector,
    pay: Selector,
    link: Selector,
    description: Selector,
}

impl WeWorkRemotely {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        WeWorkRemotely {
            base_url: base_url.to_string(),
            listing: selector("li.feature"),
            title: selector(".title"),
            company: selector(".company"),
            pay: selector(".pay"),
            link: selector("a"),
            description: selector(".job-listing-description"),
        }
    }

    fn detail_url(&self, href: &str) -> Option<String> {
        let base = Url::parse(&self.base_url).ok()?;
        base.join(href).ok().map(String::from)
    }

    fn fetch_description(&self, url: &str, pages: &dyn PageSource) -> String {
        let Some(body) = pages.fetch(url) else {
            debug!("No detail page for {}", url);
            return String::new();
        };
        let document = Html::parse_document(&body);
        document
            .select(&self.description)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }
}

impl Default for WeWorkRemotely {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteExtractor for WeWorkRemotely {
    fn title_prefix(&self) -> &'static str {
        "Beginner Friendly: "
    }

    fn listing_selector(&self) -> &Selector {
        &self.listing
    }

    /// The listing's first anchor is its detail link; without an href the
    /// listing is skipped rather than following some later link.
    fn extract_listing(&self, job: ElementRef<'_>, pages: &dyn PageSource) -> Option<RawJobRecord> {
        let title = required_text(job, &self.title)?;
        let company = required_text(job, &self.company)?;
        let raw_salary = select_text(job, &self.pay).unwrap_or_default();

        let href = job.select(&self.link).next()?.value().attr("href")?;
        let detail_url = self.detail_url(href)?;
        let raw_description = self.fetch_description(&detail_url, pages);

        Some(RawJobRecord {
            title: format!("{}{}", self.title_prefix(), title),
            company,
            raw_salary,
            raw_description,
        })
    }
}
