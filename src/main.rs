use remote_jobs_lib::{config, logger};
use remote_jobs_lib::{Aggregator, AggregatorConfig, Fetcher, RetryPolicy, RunStatus, SiteStatus, SnapshotWriter};

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "remote_job_scraper", about = "Collects entry-level remote jobs into a JSON snapshot")]
struct Args {
    /// CSV with `name,url,parser` columns. Defaults to the built-in site list.
    #[arg(long)]
    sites: Option<PathBuf>,

    /// Directory the snapshot is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum jobs kept per site.
    #[arg(long, default_value_t = config::MAX_RESULTS)]
    max_results: usize,

    /// Pause between sites, in seconds.
    #[arg(long, default_value_t = config::SITE_DELAY.as_secs())]
    site_delay_secs: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    let args = Args::parse();
    info!("Starting remote job scrape...");

    let sites = match &args.sites {
        Some(path) => config::load_sites(path)?,
        None => config::default_sites(),
    };

    let fetcher = Fetcher::new(RetryPolicy::default())?;
    let aggregator = Aggregator::new(fetcher, AggregatorConfig {
        max_results: args.max_results,
        site_delay: Duration::from_secs(args.site_delay_secs),
    });

    let report = aggregator.run(&sites);

    for outcome in &report.outcomes {
        match outcome.status {
            SiteStatus::Scraped(n) => info!("{}: {} jobs", outcome.site, n),
            SiteStatus::Failed => warn!("{}: failed", outcome.site),
        }
    }

    if report.status() == RunStatus::Empty {
        warn!("No jobs found. Check the network or whether the site markup changed.");
        return Ok(());
    }

    info!("Found {} jobs in total ({} sites failed)", report.total_jobs(), report.failed_sites());
    if let Some(sample) = report.sample() {
        let preview: String = sample.description.chars().take(100).collect();
        info!("Sample job:");
        info!("  Title:   {}", sample.title);
        info!("  Company: {}", sample.company);
        info!("  Salary:  {}", sample.salary);
        info!("  Desc:    {}...", preview);
    }

    let path = SnapshotWriter::new(&args.output_dir).write(report.result)?;
    info!("Done! Results saved to {}", path.display());
    Ok(())
}
