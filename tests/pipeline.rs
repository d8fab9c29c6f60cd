use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use remote_jobs_lib::{
    Aggregator, AggregatorConfig, FetchError, Fetcher, PageSource, ParserKind, RetryPolicy, RunStatus,
    SiteConfig, SiteStatus, SnapshotWriter, Transport,
};

struct Fixtures(HashMap<&'static str, String>);

impl PageSource for Fixtures {
    fn fetch(&self, url: &str) -> Option<String> {
        self.0.get(url).cloned()
    }
}

fn remoteok_page() -> String {
    let rows = [
        ("Customer Support", "Helpdesk Inc", "$500-$700/week", "Senior agents with 5 years experience required"),
        ("Data Entry", "Typist Co", "", ""),
        ("Content Moderator", "SafeNet", "$20/hour", "Degree required"),
    ];
    let body: String = rows
        .iter()
        .map(|(title, company, salary, desc)| {
            format!(
                r#"<tr class="job"><td class="company"><h2>{}</h2><h3>{}</h3></td><td class="location">Worldwide</td><td>{}</td><td class="job-description">{}</td></tr>"#,
                title, company, salary, desc
            )
        })
        .collect();
    format!("<html><body><table>{}</table></body></html>", body)
}

fn wwr_page() -> String {
    r#"<html><body><ul>
        <li class="feature"><a href="/remote-jobs/qa-tester"><span class="company">Bugs Ltd</span><span class="title">QA Tester</span><span class="pay">$50,000</span></a></li>
        <li class="feature"><a href="/remote-jobs/va"><span class="company">Assist Co</span><span class="title">Virtual Assistant</span></a></li>
    </ul></body></html>"#
        .to_string()
}

fn fixtures() -> Fixtures {
    let mut pages = HashMap::new();
    pages.insert("https://remoteok.test/entry", remoteok_page());
    pages.insert("https://wwr.test/search", wwr_page());
    pages.insert(
        "https://weworkremotely.com/remote-jobs/qa-tester",
        r#"<div class="job-listing-description">Experienced testers only.</div>"#.to_string(),
    );
    // The virtual assistant detail page is missing on purpose.
    Fixtures(pages)
}

fn sites() -> Vec<SiteConfig> {
    vec![
        SiteConfig::new("RemoteOK", "https://remoteok.test/entry", ParserKind::RemoteOk),
        SiteConfig::new("WeWorkRemotely", "https://wwr.test/search", ParserKind::WeWorkRemotely),
    ]
}

fn no_delay() -> AggregatorConfig {
    AggregatorConfig {
        site_delay: Duration::ZERO,
        ..AggregatorConfig::default()
    }
}

#[test]
fn two_sites_end_to_end() {
    let report = Aggregator::new(fixtures(), no_delay()).run(&sites());

    assert_eq!(report.status(), RunStatus::Completed);
    assert_eq!(report.failed_sites(), 0);
    assert_eq!(report.outcomes[0].status, SiteStatus::Scraped(3));
    assert_eq!(report.outcomes[1].status, SiteStatus::Scraped(2));

    let jobs = &report.result.jobs;
    assert_eq!(jobs.len(), 5);
    assert!(jobs.iter().all(|j| !j.salary.is_empty() && !j.description.is_empty()));
    assert!(jobs[..3].iter().all(|j| j.title.starts_with("Entry Level: ")));
    assert!(jobs[3..].iter().all(|j| j.title.starts_with("Beginner Friendly: ")));

    assert_eq!(jobs[0].salary, "$350-490/week");
    assert!(jobs[0].description.contains("No experience required"));
    assert!(jobs[0].description.to_lowercase().contains("junior"));
    assert_eq!(jobs[1].salary, "$350-$500/week");
    assert_eq!(jobs[2].salary, "$14/week");
    assert_eq!(jobs[2].description, "high school diploma accepted");

    assert_eq!(jobs[3].salary, "$35-0/week");
    assert_eq!(jobs[3].description, "beginner-friendly testers only.");
    assert_eq!(
        jobs[4].description,
        "We accept beginners with full training provided. No experience required."
    );
}

#[test]
fn failed_site_is_reported_and_skipped() {
    let mut fixtures = fixtures();
    fixtures.0.remove("https://remoteok.test/entry");

    let report = Aggregator::new(fixtures, no_delay()).run(&sites());

    assert_eq!(report.failed_sites(), 1);
    assert_eq!(report.outcomes[0].status, SiteStatus::Failed);
    assert_eq!(report.total_jobs(), 2);
    assert!(report.result.jobs.iter().all(|j| j.title.starts_with("Beginner Friendly: ")));
}

#[test]
fn run_result_lands_in_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let report = Aggregator::new(fixtures(), no_delay()).run(&sites());

    let path = SnapshotWriter::new(dir.path()).write(report.result).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("remote_jobs_") && name.ends_with(".json"));
    let written: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 5);
    assert_eq!(written[3]["company"], "Bugs Ltd");
}

/// Fails a fixed number of times, then serves the page.
struct Flaky {
    failures: u32,
    calls: Cell<u32>,
}

impl Transport for Flaky {
    fn get(&self, _url: &str, _user_agent: &str) -> Result<String, FetchError> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n <= self.failures {
            Err(FetchError::Status(502))
        } else {
            Ok(remoteok_page())
        }
    }
}

#[test]
fn fetcher_recovers_on_third_attempt() {
    let transport = Flaky { failures: 2, calls: Cell::new(0) };
    let fetcher = Fetcher::with_transport(transport, RetryPolicy::immediate());

    let sites = vec![SiteConfig::new("RemoteOK", "https://remoteok.test/entry", ParserKind::RemoteOk)];
    let report = Aggregator::new(fetcher, no_delay()).run(&sites);

    assert_eq!(report.outcomes[0].status, SiteStatus::Scraped(3));
}

#[test]
fn fetcher_stops_once_body_arrives() {
    let transport = Flaky { failures: 2, calls: Cell::new(0) };
    let fetcher = Fetcher::with_transport(transport, RetryPolicy::immediate());

    assert!(fetcher.fetch("https://remoteok.test/entry").is_some());
    assert_eq!(fetcher.transport().calls.get(), 3);

    assert!(fetcher.fetch("https://remoteok.test/entry").is_some());
    assert_eq!(fetcher.transport().calls.get(), 4);
}
