pub mod aggregator;
pub mod config;
pub mod delay_manager;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logger;
pub mod normalizer;
pub mod remoteok;
pub mod snapshot;
pub mod weworkremotely;

// Exporting types for convenience
pub use aggregator::{Aggregator, AggregatorConfig, RunReport, RunResult, RunStatus, SiteOutcome, SiteStatus};
pub use config::{ParserKind, SiteConfig};
pub use delay_manager::{DelayKind, Pause, Sleeper};
pub use error::{ConfigError, FetchError, SnapshotError};
pub use extractor::{RawJobRecord, SiteExtractor};
pub use fetcher::{Fetcher, PageSource, RetryPolicy, Transport};
pub use normalizer::{JobRecord, Normalizer};
pub use snapshot::SnapshotWriter;
