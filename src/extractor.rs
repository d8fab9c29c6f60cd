use scraper::{ElementRef, Html, Selector};
use log::debug;

use crate::config::ParserKind;
use crate::fetcher::PageSource;
use crate::remoteok::RemoteOk;
use crate::weworkremotely::WeWorkRemotely;

/// A job listing as scraped, before normalization. The title already
/// carries the site's prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJobRecord {
    pub title: String,
    pub company: String,
    pub raw_salary: String,
    pub raw_description: String,
}

/// Site-specific extraction strategy.
pub trait SiteExtractor {
    /// Prefix put in front of every title from this site.
    fn title_prefix(&self) -> &'static str;

    /// Selector matching one element per listing.
    fn listing_selector(&self) -> &Selector;

    /// Extracts one listing. `None` means the listing is malformed and skipped.
    fn extract_listing(&self, listing: ElementRef<'_>, pages: &dyn PageSource) -> Option<RawJobRecord>;

    /// Scans the page and returns at most `max_results` records.
    fn extract(&self, html: &str, pages: &dyn PageSource, max_results: usize) -> Vec<RawJobRecord> {
        let document = Html::parse_document(html);
        let mut jobs = Vec::new();
        let mut skipped = 0;

        for listing in document.select(self.listing_selector()) {
            if jobs.len() >= max_results {
                break;
            }
            match self.extract_listing(listing, pages) {
                Some(job) => jobs.push(job),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} malformed listings", skipped);
        }
        jobs
    }
}

impl ParserKind {
    pub fn extractor(self) -> Box<dyn SiteExtractor> {
        match self {
            ParserKind::RemoteOk => Box::new(RemoteOk::new()),
            ParserKind::WeWorkRemotely => Box::new(WeWorkRemotely::new()),
        }
    }
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {:?}: {}", css, e))
}

/// Text of an element: each text node trimmed, empty ones dropped, joined by a space.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first match under `scope`, or `None` if nothing matches.
pub(crate) fn select_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

/// Like `select_text`, but an empty result counts as missing.
pub(crate) fn required_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    select_text(scope, selector).filter(|s| !s.is_empty())
}
