use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use rand::seq::SliceRandom;
use std::time::Duration;
use log::{debug, warn};

use crate::config;
use crate::delay_manager::{DelayKind, Pause, Sleeper};
use crate::error::FetchError;

/// Anything that can turn a URL into a page body, or nothing.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Option<String>;
}

/// One HTTP GET. Non-200 responses come back as `FetchError::Status`.
pub trait Transport {
    fn get(&self, url: &str, user_agent: &str) -> Result<String, FetchError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        // No cookie store: every call starts without session state.
        let client = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, user_agent: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, config::ACCEPT)
            .send()?;

        let status = resp.status();
        if status.as_u16() != 200 {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.text()?)
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub status_backoff: Duration,
    pub error_backoff: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: config::MAX_ATTEMPTS,
            status_backoff: config::STATUS_BACKOFF,
            error_backoff: config::ERROR_BACKOFF,
            timeout: config::REQUEST_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget, no waiting.
    pub fn immediate() -> Self {
        RetryPolicy {
            status_backoff: Duration::ZERO,
            error_backoff: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    fn backoff_for(&self, err: &FetchError) -> Duration {
        match err {
            FetchError::Status(_) => self.status_backoff,
            FetchError::Transport(_) => self.error_backoff,
        }
    }
}

pub struct Fetcher<T: Transport = HttpTransport> {
    transport: T,
    policy: RetryPolicy,
    pauser: Box<dyn Pause>,
}

impl Fetcher<HttpTransport> {
    pub fn new(policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(policy.timeout)?;
        Ok(Fetcher::with_transport(transport, policy))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(transport: T, policy: RetryPolicy) -> Self {
        Fetcher {
            transport,
            policy,
            pauser: Box::new(Sleeper),
        }
    }

    /// Replaces the blocking sleep between attempts.
    pub fn with_pause(mut self, pauser: impl Pause + 'static) -> Self {
        self.pauser = Box::new(pauser);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        config::USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(config::USER_AGENTS[0])
    }
}

impl<T: Transport> PageSource for Fetcher<T> {
    fn fetch(&self, url: &str) -> Option<String> {
        for attempt in 1..=self.policy.max_attempts {
            debug!("GET {} (attempt {}/{})", url, attempt, self.policy.max_attempts);
            match self.transport.get(url, self.random_user_agent()) {
                Ok(body) => return Some(body),
                Err(e) => {
                    warn!("Attempt {}/{} for {} failed: {}", attempt, self.policy.max_attempts, url, e);
                    if attempt < self.policy.max_attempts {
                        self.pauser.pause(self.policy.backoff_for(&e), DelayKind::Retry);
                    }
                }
            }
        }
        warn!("Giving up on {} after {} attempts", url, self.policy.max_attempts);
        None
    }
}
