//! Serde types of the configuration document

use crate::constants::{
    DEFAULT_BACKUP_DIR_NAME, DEFAULT_LOG_DIR, DEFAULT_STATIC_DIR, DEFAULT_TEMPLATES_DIR,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One entry of the `projects` table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub path: PathBuf,
    #[serde(default = "get_default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "get_default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub enabled: bool,
}

/// One entry of the `cdn_mappings` table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MappingConfig {
    pub pattern: String,
    pub replacement: String,
    #[serde(default = "get_default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub description: String,
    /// Path inside the static root. Derived from `replacement` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

/// How a located match is substituted into the document.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceMode {
    /// Every literal occurrence of the matched text is replaced.
    #[default]
    AllOccurrences,
    /// Only the matched span is replaced.
    MatchedSpan,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Yaml,
}

impl LogFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Yaml => "yaml",
        }
    }
}

/// The `replacement_settings` table.
///
/// Deserialized once per run and handed to every component by reference;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    #[serde(default = "get_default_true")]
    pub create_backup: bool,
    #[serde(default = "get_default_backup_dir_name")]
    pub backup_dir_name: String,
    #[serde(default = "get_default_true")]
    pub save_log: bool,
    #[serde(default = "get_default_log_dir")]
    pub log_dir: String,
    #[serde(default = "get_default_true")]
    pub dry_run_first: bool,
    #[serde(default)]
    pub replace_mode: ReplaceMode,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "get_default_true")]
    pub verify_backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            create_backup: true,
            backup_dir_name: get_default_backup_dir_name(),
            save_log: true,
            log_dir: get_default_log_dir(),
            dry_run_first: true,
            replace_mode: ReplaceMode::default(),
            log_format: LogFormat::default(),
            verify_backup: true,
        }
    }
}

/// Read-only view of a configured project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub root_path: PathBuf,
    pub templates_subdir: String,
    pub static_subdir: String,
    pub enabled: bool,
}

impl Project {
    pub fn from_config(id: &str, config: &ProjectConfig) -> Self {
        Self {
            id: id.to_string(),
            name: config.name.clone().unwrap_or_else(|| id.to_string()),
            root_path: config.path.clone(),
            templates_subdir: config.templates_dir.clone(),
            static_subdir: config.static_dir.clone(),
            enabled: config.enabled,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root_path.join(&self.templates_subdir)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root_path.join(&self.static_subdir)
    }
}

fn get_default_templates_dir() -> String {
    DEFAULT_TEMPLATES_DIR.to_string()
}

fn get_default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}

fn get_default_backup_dir_name() -> String {
    DEFAULT_BACKUP_DIR_NAME.to_string()
}

fn get_default_log_dir() -> String {
    DEFAULT_LOG_DIR.to_string()
}

fn get_default_true() -> bool {
    true
}
