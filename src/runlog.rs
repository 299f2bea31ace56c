//! Structured record of one non-dry project run.

use crate::config::LogFormat;
use crate::constants::{FILE_TIMESTAMP_FORMAT, RUN_LOG_PREFIX};
use crate::error::Result;
use crate::ioutils::{create_dir_all, write_file};
use crate::rewrite::ChangeRecord;
use crate::stats::RunStats;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    pub project: String,
    /// ISO-8601 time the run started.
    pub timestamp: String,
    pub stats: RunStats,
    pub files: Vec<ChangeRecord>,
}

impl RunLog {
    pub fn new(
        project: &str,
        started_at: &DateTime<Local>,
        stats: &RunStats,
        files: &[ChangeRecord],
    ) -> Self {
        Self {
            project: project.to_string(),
            timestamp: started_at.to_rfc3339(),
            stats: stats.clone(),
            files: files.to_vec(),
        }
    }

    pub fn file_name(started_at: &DateTime<Local>, format: LogFormat) -> String {
        format!(
            "{RUN_LOG_PREFIX}{}.{}",
            started_at.format(FILE_TIMESTAMP_FORMAT),
            format.extension()
        )
    }

    /// Serializes the log into `log_dir`, creating it if needed.
    pub fn persist(
        &self,
        log_dir: &Path,
        started_at: &DateTime<Local>,
        format: LogFormat,
    ) -> Result<PathBuf> {
        create_dir_all(log_dir)?;
        let path = log_dir.join(Self::file_name(started_at, format));
        let serialized = match format {
            LogFormat::Json => serde_json::to_string_pretty(self)?,
            LogFormat::Yaml => serde_yaml::to_string(self)?,
        };
        write_file(&serialized, &path)?;
        Ok(path)
    }
}
