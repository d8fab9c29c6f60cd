use log::LevelFilter;
use env_logger::Builder;
use std::io::Write;
use chrono::Local;

/// Timestamped console logger. `RUST_LOG` overrides the default `info` level,
/// e.g. `RUST_LOG=remote_jobs_lib=debug` to see skipped listings and retries.
pub fn init() {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                short_target(record.target()),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Last path segment of a log target: `remote_jobs_lib::fetcher` -> `fetcher`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}
