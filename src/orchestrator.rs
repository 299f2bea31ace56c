//! Batch processing of one project: pre-flight gates, rewrite of every
//! template file, statistics and run log.

use crate::assets::{self, AssetReport};
use crate::backup::{backup_dir_name, create_verified_backup};
use crate::config::{Project, Settings};
use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::ioutils::{read_file, relative_display, write_file};
use crate::mapping::MappingTable;
use crate::rewrite::{predict, rewrite, ChangeRecord};
use crate::runlog::RunLog;
use crate::stats::RunStats;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// What to do when mapped local files are absent from the static root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingAssets {
    /// Record them in the stats and proceed.
    #[default]
    Warn,
    /// Write placeholder files, then proceed.
    CreatePlaceholders,
    /// Fail the project before touching anything.
    Abort,
}

/// Per-run switches supplied by the caller instead of interactive prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    pub missing_assets: MissingAssets,
}

impl RunOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true, ..Self::default() }
    }

    pub fn live(missing_assets: MissingAssets) -> Self {
        Self { dry_run: false, missing_assets }
    }
}

/// Would-be changes of one file in a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePrediction {
    pub file: String,
    pub total: usize,
    pub by_rule: Vec<(String, usize)>,
}

/// Everything a finished project run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOutcome {
    pub project_id: String,
    pub project_name: String,
    pub dry_run: bool,
    pub stats: RunStats,
    pub changes: Vec<ChangeRecord>,
    pub predictions: Vec<FilePrediction>,
    pub assets: Option<AssetReport>,
    pub backup_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// A single run over one project.
///
/// Owns the statistics and the detailed change log for the duration of the
/// run; the mapping table and settings are only borrowed.
pub struct ProjectRun<'a> {
    project: &'a Project,
    table: &'a MappingTable,
    settings: &'a Settings,
    options: RunOptions,
    started_at: DateTime<Local>,
}

impl<'a> ProjectRun<'a> {
    pub fn new(
        project: &'a Project,
        table: &'a MappingTable,
        settings: &'a Settings,
        options: RunOptions,
    ) -> Self {
        Self { project, table, settings, options, started_at: Local::now() }
    }

    /// Pins the start time used for the backup and log names.
    pub fn with_start_time(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.project
            .root()
            .join(backup_dir_name(&self.settings.backup_dir_name, &self.started_at))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.project.root().join(&self.settings.log_dir)
    }

    /// Executes the run.
    ///
    /// Gate refusals (`AssetsMissing`, `BackupFailed`) are returned as errors
    /// before any template is modified. Per-file failures only bump
    /// `stats.errors`.
    pub fn run(self) -> Result<ProjectOutcome> {
        let mut outcome = ProjectOutcome {
            project_id: self.project.id.clone(),
            project_name: self.project.name.clone(),
            dry_run: self.options.dry_run,
            stats: RunStats::default(),
            changes: Vec::new(),
            predictions: Vec::new(),
            assets: None,
            backup_dir: None,
            log_file: None,
        };

        log::info!(
            "Processing project '{}' at {}{}",
            self.project.name,
            self.project.root().display(),
            if self.options.dry_run { " [DRY RUN]" } else { "" }
        );

        if !self.options.dry_run {
            outcome.assets = Some(self.check_assets(&mut outcome.stats)?);

            if self.settings.create_backup {
                let dest = self.backup_dir();
                let created = create_verified_backup(
                    &self.project.templates_dir(),
                    &dest,
                    self.settings.verify_backup,
                )?;
                outcome.backup_dir = Some(created);
            } else {
                log::warn!("Backup is disabled for project '{}'", self.project.id);
            }
        }

        let templates_dir = self.project.templates_dir();
        let discovery = discover(&templates_dir)?;
        outcome.stats.errors += discovery.unreadable;
        let files = discovery.files;
        if files.is_empty() {
            log::warn!("No template files found in {}", templates_dir.display());
            return Ok(outcome);
        }

        let total = files.len();
        for (i, path) in files.iter().enumerate() {
            outcome.stats.files_scanned += 1;
            let relative = relative_display(path, &templates_dir);

            if self.options.dry_run {
                match self.predict_file(path, &relative) {
                    Ok(Some(prediction)) => {
                        log::info!(
                            "[{}/{total}] {relative} ({} possible changes)",
                            i + 1,
                            prediction.total
                        );
                        outcome.predictions.push(prediction);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        outcome.stats.errors += 1;
                        log::error!("[{}/{total}] {relative}: {e}", i + 1);
                    }
                }
                continue;
            }

            match self.rewrite_file(path, &relative) {
                Ok(Some(record)) => {
                    log::info!(
                        "[{}/{total}] {relative} ({} changes)",
                        i + 1,
                        record.replacement_count
                    );
                    outcome.stats.record_modified(record.replacement_count);
                    outcome.changes.push(record);
                }
                Ok(None) => log::debug!("[{}/{total}] {relative} unchanged", i + 1),
                Err(e) => {
                    outcome.stats.errors += 1;
                    log::error!("[{}/{total}] {relative}: {e}", i + 1);
                }
            }
        }

        if !self.options.dry_run {
            outcome.log_file = self.save_log(&outcome.stats, &outcome.changes);
        }

        Ok(outcome)
    }

    fn check_assets(&self, stats: &mut RunStats) -> Result<AssetReport> {
        let static_dir = self.project.static_dir();
        let report = assets::check(self.table.rules(), &static_dir);
        let missing = report.missing();
        if missing.is_empty() {
            return Ok(report);
        }

        log::warn!("{} static file(s) missing under {}", missing.len(), static_dir.display());
        match self.options.missing_assets {
            MissingAssets::Abort => Err(Error::AssetsMissing { count: missing.len() }),
            MissingAssets::Warn => {
                stats.missing_files.extend(missing.iter().map(|a| a.local_path.clone()));
                Ok(report)
            }
            MissingAssets::CreatePlaceholders => {
                let created = assets::create_placeholders(&missing);
                stats.errors += created.failed;
                stats.missing_files.extend(
                    missing
                        .iter()
                        .filter(|a| !created.created.contains(&a.local_path))
                        .map(|a| a.local_path.clone()),
                );
                stats.copied_files.extend(created.created);
                Ok(report)
            }
        }
    }

    fn predict_file(&self, path: &Path, relative: &str) -> Result<Option<FilePrediction>> {
        let content = read_file(path)?;
        let by_rule = predict(&content, self.table.rules());
        let total = by_rule.iter().map(|(_, count)| count).sum();
        Ok((total > 0).then(|| FilePrediction { file: relative.to_string(), total, by_rule }))
    }

    fn rewrite_file(&self, path: &Path, relative: &str) -> Result<Option<ChangeRecord>> {
        let content = read_file(path)?;
        let result = rewrite(&content, self.table.rules(), self.settings.replace_mode);
        if !result.changed {
            return Ok(None);
        }

        write_file(&result.content, path)?;
        Ok(Some(ChangeRecord {
            file: relative.to_string(),
            replacement_count: result.count,
            items: result.items,
        }))
    }

    fn save_log(&self, stats: &RunStats, changes: &[ChangeRecord]) -> Option<PathBuf> {
        if !self.settings.save_log || changes.is_empty() {
            return None;
        }

        let log = RunLog::new(&self.project.name, &self.started_at, stats, changes);
        match log.persist(&self.log_dir(), &self.started_at, self.settings.log_format) {
            Ok(path) => {
                log::info!("Run log written to {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("Failed to write run log: {e}");
                None
            }
        }
    }
}
