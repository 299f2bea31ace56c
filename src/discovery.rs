use crate::constants::TEMPLATE_EXTENSIONS;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Builds the matcher for template file names.
fn template_globset() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in TEMPLATE_EXTENSIONS {
        builder.add(Glob::new(&format!("*.{ext}"))?);
    }
    Ok(builder.build()?)
}

/// Template files found under a root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    /// Entries that could not be read and were left out of `files`.
    pub unreadable: usize,
}

/// Recursively collects template files under `root` in lexical tree order.
///
/// Symbolic links are followed. An entry that cannot be read (or a link
/// loop) is logged, counted in `unreadable` and skipped. A missing `root`
/// yields no files.
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Discovery> {
    let root = root.as_ref();
    let mut discovery = Discovery::default();
    if !root.exists() {
        log::debug!("Template root {} does not exist", root.display());
        return Ok(discovery);
    }

    let matcher = template_globset()?;

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("Skipping unreadable entry under {}: {e}", root.display());
                discovery.unreadable += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            discovery.files.push(entry.into_path());
        }
    }

    log::debug!(
        "Discovered {} template file(s) under {}",
        discovery.files.len(),
        root.display()
    );
    Ok(discovery)
}
