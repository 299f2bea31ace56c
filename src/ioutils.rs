use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(|e| Error::file(dest_path, e))
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| Error::file(path, e))
}

/// Write content to a file, creating parent directories if needed.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(|e| Error::file(dest_path, e))
}

/// Recursively copies `source` into `dest`, which must not exist yet.
///
/// Symbolic links are followed and their targets copied as regular files.
/// Returns the number of files copied.
pub fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<usize> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    if dest.exists() {
        return Err(Error::AlreadyExists { path: dest.to_path_buf() });
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(anyhow::Error::from)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target).map_err(|e| Error::file(entry.path(), e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// SHA-256 of every file under `root` (following links), keyed by path relative to `root`.
pub fn tree_digest<P: AsRef<Path>>(root: P) -> Result<BTreeMap<PathBuf, String>> {
    let root = root.as_ref();
    let mut digests = BTreeMap::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let bytes = std::fs::read(entry.path()).map_err(|e| Error::file(entry.path(), e))?;
        let relative =
            entry.path().strip_prefix(root).map_err(anyhow::Error::from)?.to_path_buf();
        digests.insert(relative, hex::encode(Sha256::digest(&bytes)));
    }
    Ok(digests)
}

/// `path` relative to `base` with forward slashes, or the full path if unrelated.
pub fn relative_display<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> String {
    let path = path.as_ref();
    path.strip_prefix(base.as_ref())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
