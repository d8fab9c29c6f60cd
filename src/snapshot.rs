use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use log::info;

use crate::aggregator::RunResult;
use crate::error::SnapshotError;

const FILE_PREFIX: &str = "remote_jobs_";

/// Writes one JSON file per run into `dir`.
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        SnapshotWriter {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Names are unique only for runs started at least a second apart.
    pub fn path_for(&self, result: &RunResult) -> PathBuf {
        let stamp = result.started_at.format("%Y%m%d_%H%M%S");
        self.dir.join(format!("{}{}.json", FILE_PREFIX, stamp))
    }

    pub fn write(&self, result: RunResult) -> Result<PathBuf, SnapshotError> {
        let path = self.path_for(&result);
        let io_err = |source: std::io::Error| SnapshotError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let file = File::create(&path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &result.jobs)?;
        out.flush().map_err(io_err)?;

        info!("Saved {} jobs to {:?}", result.jobs.len(), path);
        Ok(path)
    }
}
