use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Cannot access '{}': {source}.", path.display())]
    FileError { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse JSON: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to walk directory: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Failed to build file matcher. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Prompt failed: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error("Configuration file '{}' not found. Run `cdn-localizer init` to create one.", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse configuration file '{}': {reason}.", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    /// A mapping pattern which is not a valid regular expression.
    #[error("Invalid pattern for mapping '{rule}': {source}")]
    PatternError { rule: String, source: regex::Error },

    #[error("Backup failed: {reason}.")]
    BackupFailed { reason: String },

    #[error("{count} static asset(s) referenced by the mappings are missing.")]
    AssetsMissing { count: usize },

    #[error("Project '{id}' is not defined in the configuration.")]
    UnknownProject { id: String },

    #[error("No enabled projects found in the configuration.")]
    NoEnabledProjects,

    #[error("No enabled CDN mappings found in the configuration.")]
    NoActiveMappings,

    #[error("Cannot proceed: '{}' already exists.", path.display())]
    AlreadyExists { path: PathBuf },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn file<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::FileError { path: path.into(), source }
    }

    /// Whether this error is a refusal of one of the pre-flight gates.
    ///
    /// Such errors are reported as a `failed` project; every other error is
    /// reported as `error`.
    pub fn is_project_failure(&self) -> bool {
        matches!(self, Error::BackupFailed { .. } | Error::AssetsMissing { .. })
    }

    /// Short machine-friendly reason used in reports.
    pub fn reason(&self) -> String {
        match self {
            Error::BackupFailed { .. } => "backup_failed".to_string(),
            Error::AssetsMissing { .. } => "assets_missing".to_string(),
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
