use std::thread;
use std::time::Duration;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayKind {
    /// Politeness pause between two sites.
    Site,
    /// Backoff between two attempts at the same URL.
    Retry,
}

impl DelayKind {
    fn label(self) -> &'static str {
        match self {
            DelayKind::Site => "Site Delay",
            DelayKind::Retry => "Retry Backoff",
        }
    }
}

/// Where the fetcher and aggregator wait. `Sleeper` blocks the thread.
pub trait Pause {
    fn pause(&self, delay: Duration, kind: DelayKind);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sleeper;

impl Pause for Sleeper {
    fn pause(&self, delay: Duration, kind: DelayKind) {
        if delay.is_zero() {
            return;
        }
        info!("Waiting for {:.1} seconds ({})...", delay.as_secs_f64(), kind.label());
        thread::sleep(delay);
    }
}
