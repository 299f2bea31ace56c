//! Backup of a project's templates directory before any file is rewritten.

use crate::constants::{FILE_TIMESTAMP_FORMAT, TIMESTAMP_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::ioutils::{copy_dir_all, tree_digest};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Substitutes the run timestamp into the configured backup directory name.
pub fn backup_dir_name(template: &str, started_at: &DateTime<Local>) -> String {
    template.replace(
        TIMESTAMP_PLACEHOLDER,
        &started_at.format(FILE_TIMESTAMP_FORMAT).to_string(),
    )
}

/// Copies `templates_dir` into `dest_dir`.
///
/// Returns `Ok(false)` when `templates_dir` does not exist. An existing
/// `dest_dir` is an error: backups are never merged or overwritten.
pub fn backup<P: AsRef<Path>, Q: AsRef<Path>>(templates_dir: P, dest_dir: Q) -> Result<bool> {
    let templates_dir = templates_dir.as_ref();
    let dest_dir = dest_dir.as_ref();

    if !templates_dir.is_dir() {
        log::warn!("Templates directory not found: {}", templates_dir.display());
        return Ok(false);
    }

    let copied = copy_dir_all(templates_dir, dest_dir)?;
    log::info!("Backed up {copied} file(s) to {}", dest_dir.display());
    Ok(true)
}

/// Checks that every file of `source` exists in `backup` with identical content.
pub fn verify<P: AsRef<Path>, Q: AsRef<Path>>(source: P, backup: Q) -> Result<bool> {
    let expected = tree_digest(source.as_ref())?;
    let actual = tree_digest(backup.as_ref())?;
    let matches = expected == actual;
    if !matches {
        log::error!(
            "Backup {} does not match {}",
            backup.as_ref().display(),
            source.as_ref().display()
        );
    }
    Ok(matches)
}

/// Takes the backup for one run, turning every problem into `BackupFailed`.
pub fn create_verified_backup(
    templates_dir: &Path,
    dest_dir: &Path,
    verify_copy: bool,
) -> Result<PathBuf> {
    let created = backup(templates_dir, dest_dir).map_err(|e| Error::BackupFailed {
        reason: e.to_string(),
    })?;
    if !created {
        return Err(Error::BackupFailed {
            reason: format!("templates directory '{}' does not exist", templates_dir.display()),
        });
    }

    if verify_copy {
        let identical = verify(templates_dir, dest_dir)
            .map_err(|e| Error::BackupFailed { reason: e.to_string() })?;
        if !identical {
            return Err(Error::BackupFailed {
                reason: format!("backup '{}' differs from its source", dest_dir.display()),
            });
        }
    }

    Ok(dest_dir.to_path_buf())
}
