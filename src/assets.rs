//! Static-asset checker: makes sure every local file the mappings point at exists.

use crate::ioutils::write_file;
use crate::mapping::Rule;
use std::path::{Path, PathBuf};

const CSS_LIKE: &[&str] = &["css", "scss", "less"];
const SCRIPT_LIKE: &[&str] = &["js", "mjs", "cjs", "ts"];

/// Existence of one rule's local file.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetStatus {
    pub rule_name: String,
    pub local_path: String,
    pub resolved_path: PathBuf,
    pub present: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetReport {
    pub entries: Vec<AssetStatus>,
}

impl AssetReport {
    pub fn ok(&self) -> bool {
        self.entries.iter().all(|e| e.present)
    }

    pub fn missing(&self) -> Vec<&AssetStatus> {
        self.entries.iter().filter(|e| !e.present).collect()
    }

    pub fn found(&self) -> Vec<&AssetStatus> {
        self.entries.iter().filter(|e| e.present).collect()
    }
}

/// Checks `static_root / local_path` for every rule that names a local file.
pub fn check<P: AsRef<Path>>(rules: &[Rule], static_root: P) -> AssetReport {
    let static_root = static_root.as_ref();
    let entries = rules
        .iter()
        .filter_map(|rule| {
            let local_path = rule.local_path.as_ref()?;
            let resolved_path = static_root.join(local_path);
            let present = resolved_path.exists();
            if present {
                log::debug!("Found {local_path} for '{}'", rule.name);
            } else {
                log::warn!("Missing {local_path} for '{}'", rule.name);
            }
            Some(AssetStatus {
                rule_name: rule.name.clone(),
                local_path: local_path.clone(),
                resolved_path,
                present,
            })
        })
        .collect();

    AssetReport { entries }
}

/// Stand-in content for a missing asset, commented in the file's own syntax.
pub fn placeholder_content(rule_name: &str, path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if CSS_LIKE.contains(&ext.as_str()) {
        format!("/* Placeholder for {rule_name} */\n/* Download from CDN and replace this file */\n")
    } else if SCRIPT_LIKE.contains(&ext.as_str()) {
        format!("// Placeholder for {rule_name}\n// Download from CDN and replace this file\n")
    } else {
        format!("# Placeholder for {rule_name}\n")
    }
}

/// Outcome of [`create_placeholders`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderResult {
    /// Local paths that now have a stand-in file.
    pub created: Vec<String>,
    pub failed: usize,
}

impl PlaceholderResult {
    pub fn count(&self) -> usize {
        self.created.len()
    }
}

/// Writes a placeholder at each missing resolved path.
///
/// Individual failures are logged and counted, never propagated. A path that
/// appeared in the meantime is left untouched.
pub fn create_placeholders(missing: &[&AssetStatus]) -> PlaceholderResult {
    let mut result = PlaceholderResult::default();

    for asset in missing {
        if asset.resolved_path.exists() {
            continue;
        }
        let content = placeholder_content(&asset.rule_name, &asset.resolved_path);
        match write_file(&content, &asset.resolved_path) {
            Ok(()) => {
                log::info!("Created placeholder {}", asset.local_path);
                result.created.push(asset.local_path.clone());
            }
            Err(e) => {
                log::error!("Failed to create placeholder {}: {e}", asset.local_path);
                result.failed += 1;
            }
        }
    }

    result
}
