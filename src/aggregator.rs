use std::time::Duration;
use chrono::{DateTime, Local};
use log::{info, warn};

use crate::config::{self, SiteConfig};
use crate::delay_manager::{DelayKind, Pause, Sleeper};
use crate::fetcher::PageSource;
use crate::normalizer::{JobRecord, Normalizer};

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub max_results: usize,
    pub site_delay: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        AggregatorConfig {
            max_results: config::MAX_RESULTS,
            site_delay: config::SITE_DELAY,
        }
    }
}

/// Every job from one run, in site order.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub started_at: DateTime<Local>,
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Scraped(usize),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOutcome {
    pub site: String,
    pub status: SiteStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// No site produced a single job.
    Empty,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub result: RunResult,
    pub outcomes: Vec<SiteOutcome>,
}

impl RunReport {
    pub fn status(&self) -> RunStatus {
        if self.result.jobs.is_empty() {
            RunStatus::Empty
        } else {
            RunStatus::Completed
        }
    }

    pub fn total_jobs(&self) -> usize {
        self.result.jobs.len()
    }

    pub fn failed_sites(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == SiteStatus::Failed)
            .count()
    }

    pub fn sample(&self) -> Option<&JobRecord> {
        self.result.jobs.first()
    }
}

pub struct Aggregator<P: PageSource> {
    pages: P,
    normalizer: Normalizer,
    config: AggregatorConfig,
    pauser: Box<dyn Pause>,
}

impl<P: PageSource> Aggregator<P> {
    pub fn new(pages: P, config: AggregatorConfig) -> Self {
        Aggregator {
            pages,
            normalizer: Normalizer::new(),
            config,
            pauser: Box::new(Sleeper),
        }
    }

    /// Replaces the blocking sleep between sites.
    pub fn with_pause(mut self, pauser: impl Pause + 'static) -> Self {
        self.pauser = Box::new(pauser);
        self
    }

    /// Scrapes each site in order. A failed site contributes nothing and
    /// never stops the run.
    pub fn run(&self, sites: &[SiteConfig]) -> RunReport {
        let started_at = Local::now();
        let mut jobs = Vec::new();
        let mut outcomes = Vec::with_capacity(sites.len());

        for (i, site) in sites.iter().enumerate() {
            if i > 0 {
                self.pauser.pause(self.config.site_delay, DelayKind::Site);
            }
            info!("Scraping {} / {} : {}", i + 1, sites.len(), site.name);

            let status = match self.pages.fetch(&site.url) {
                Some(body) => {
                    let extractor = site.parser.extractor();
                    let before = jobs.len();
                    jobs.extend(
                        extractor
                            .extract(&body, &self.pages, self.config.max_results)
                            .into_iter()
                            .map(|raw| self.normalizer.normalize(raw)),
                    );
                    let found = jobs.len() - before;
                    info!("Found {} jobs on {}", found, site.name);
                    SiteStatus::Scraped(found)
                }
                None => {
                    warn!("Failed to fetch {}", site.name);
                    SiteStatus::Failed
                }
            };

            outcomes.push(SiteOutcome {
                site: site.name.clone(),
                status,
            });
        }

        RunReport {
            result: RunResult { started_at, jobs },
            outcomes,
        }
    }
}
