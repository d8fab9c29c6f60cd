use std::fs::File;
use std::path::Path;
use std::time::Duration;
use log::{info, error};
use serde::Deserialize;

use crate::error::ConfigError;

/// Per-site cap on extracted listings.
pub const MAX_RESULTS: usize = 10;
/// Pause between consecutive sites.
pub const SITE_DELAY: Duration = Duration::from_secs(1);

pub const MAX_ATTEMPTS: u32 = 3;
pub const STATUS_BACKOFF: Duration = Duration::from_secs(2);
pub const ERROR_BACKOFF: Duration = Duration::from_secs(3);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Which extraction strategy understands a site's markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    #[serde(alias = "RemoteOK", alias = "remote_ok")]
    RemoteOk,
    #[serde(alias = "WeWorkRemotely", alias = "we_work_remotely")]
    WeWorkRemotely,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(rename = "name", alias = "Name", alias = "site", alias = "Site")]
    pub name: String,
    #[serde(rename = "url", alias = "URL", alias = "Url")]
    pub url: String,
    #[serde(rename = "parser", alias = "Parser", alias = "strategy")]
    pub parser: ParserKind,
}

impl SiteConfig {
    pub fn new(name: &str, url: &str, parser: ParserKind) -> Self {
        SiteConfig {
            name: name.to_string(),
            url: url.to_string(),
            parser,
        }
    }
}

pub fn default_sites() -> Vec<SiteConfig> {
    vec![
        SiteConfig::new(
            "RemoteOK",
            "https://remoteok.com/remote-entry-level-jobs",
            ParserKind::RemoteOk,
        ),
        SiteConfig::new(
            "WeWorkRemotely",
            "https://weworkremotely.com/remote-jobs/search?term=entry+level",
            ParserKind::WeWorkRemotely,
        ),
    ]
}

/// Reads a `name,url,parser` CSV. Rows that fail to parse are logged and skipped.
pub fn load_sites<P: AsRef<Path>>(filename: P) -> Result<Vec<SiteConfig>, ConfigError> {
    let path = filename.as_ref();
    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut sites = Vec::new();
    for result in rdr.deserialize::<SiteConfig>() {
        match result {
            Ok(site) => sites.push(site),
            Err(e) => error!("Error parsing site record: {}", e),
        }
    }

    if sites.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    info!("Loaded {} sites from {:?}", sites.len(), path);
    Ok(sites)
}
