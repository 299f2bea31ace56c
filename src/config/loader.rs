//! Configuration loading and management

use crate::config::schema::validate_document;
use crate::config::types::{MappingConfig, Project, ProjectConfig, Settings};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The whole configuration document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
    #[serde(default)]
    pub projects: IndexMap<String, ProjectConfig>,
    #[serde(default)]
    pub replacement_settings: Settings,
    #[serde(default)]
    pub cdn_mappings: IndexMap<String, MappingConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

impl Config {
    /// Loads, schema-validates and deserializes the document at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound { path: path.to_path_buf() });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let config = Self::from_str_with_format(&content, DocumentFormat::from_path(path))
            .map_err(|e| match e {
                Error::ConfigValidation(_) => e,
                other => Error::ConfigParse {
                    path: path.to_path_buf(),
                    reason: other.to_string(),
                },
            })?;

        log::debug!(
            "Loaded configuration from {}: {} project(s), {} mapping(s)",
            path.display(),
            config.projects.len(),
            config.cdn_mappings.len()
        );
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, DocumentFormat::Json)
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, DocumentFormat::Yaml)
    }

    fn from_str_with_format(content: &str, format: DocumentFormat) -> Result<Self> {
        let document: serde_json::Value = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        };
        validate_document(&document)?;
        Ok(serde_json::from_value(document)?)
    }

    /// The starter document offered when no configuration exists yet.
    pub fn default_document() -> Self {
        let mut projects = IndexMap::new();
        projects.insert(
            "my_project".to_string(),
            ProjectConfig {
                name: Some("My project".to_string()),
                path: PathBuf::from("/path/to/my_project"),
                templates_dir: crate::constants::DEFAULT_TEMPLATES_DIR.to_string(),
                static_dir: crate::constants::DEFAULT_STATIC_DIR.to_string(),
                enabled: true,
            },
        );

        Self {
            version: Some("1.0".to_string()),
            default_project: Some("my_project".to_string()),
            projects,
            replacement_settings: Settings {
                backup_dir_name: "backup_templates_{timestamp}".to_string(),
                ..Settings::default()
            },
            cdn_mappings: IndexMap::new(),
        }
    }

    /// Writes the starter document to `path`. Never overwrites an existing file.
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Err(Error::AlreadyExists { path: path.to_path_buf() });
        }

        let config = Self::default_document();
        let serialized = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => serde_json::to_string_pretty(&config)?,
            DocumentFormat::Yaml => serde_yaml::to_string(&config)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
        }
        std::fs::write(path, serialized).map_err(|e| Error::file(path, e))?;
        log::info!("Created default configuration at {}", path.display());
        Ok(config)
    }

    /// Immutable settings snapshot for one run.
    pub fn settings(&self) -> Settings {
        self.replacement_settings.clone()
    }

    /// All projects in document order.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.iter().map(|(id, p)| Project::from_config(id, p)).collect()
    }

    /// Enabled projects in document order.
    pub fn enabled_projects(&self) -> Vec<Project> {
        self.projects().into_iter().filter(|p| p.enabled).collect()
    }

    pub fn project(&self, id: &str) -> Result<Project> {
        self.projects
            .get(id)
            .map(|p| Project::from_config(id, p))
            .ok_or_else(|| Error::UnknownProject { id: id.to_string() })
    }
}
