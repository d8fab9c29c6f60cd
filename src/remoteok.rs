use scraper::{ElementRef, Selector};

use crate::extractor::{required_text, select_text, selector, RawJobRecord, SiteExtractor};
use crate::fetcher::PageSource;

/// RemoteOK renders every listing as a table row; sponsored rows carry `.ad`.
pub struct RemoteOk {
    listing: Selector,
    title: Selector,
    company: Selector,
    salary: Selector,
    location: Selector,
    description: Selector,
}

impl RemoteOk {
    pub fn new() -> Self {
        RemoteOk {
            listing: selector("tr.job:not(.ad)"),
            title: selector("h2"),
            company: selector(".company h3"),
            salary: selector(".location + td"),
            location: selector(".location"),
            description: selector(".job-description"),
        }
    }
}

impl Default for RemoteOk {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteExtractor for RemoteOk {
    fn title_prefix(&self) -> &'static str {
        "Entry Level: "
    }

    fn listing_selector(&self) -> &Selector {
        &self.listing
    }

    fn extract_listing(&self, job: ElementRef<'_>, _pages: &dyn PageSource) -> Option<RawJobRecord> {
        let title = required_text(job, &self.title)?;
        let company = required_text(job, &self.company)?;
        let raw_salary = select_text(job, &self.salary)
            .or_else(|| select_text(job, &self.location))
            .unwrap_or_default();
        let raw_description = select_text(job, &self.description).unwrap_or_default();

        Some(RawJobRecord {
            title: format!("{}{}", self.title_prefix(), title),
            company,
            raw_salary,
            raw_description,
        })
    }
}
