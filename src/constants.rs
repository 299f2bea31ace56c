//! Constants used throughout cdn-localizer

/// Configuration file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// File extensions treated as template files during discovery
pub const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm", "jinja", "jinja2", "j2"];

/// Default project layout
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default backup directory name, `{timestamp}` is substituted per run
pub const DEFAULT_BACKUP_DIR_NAME: &str = "backup_{timestamp}";
pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

/// Default directory for run logs, relative to the project root
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const RUN_LOG_PREFIX: &str = "replacement_log_";

/// `strftime` format used in backup and log file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Matched text longer than this is truncated in change records
pub const MATCHED_TEXT_LIMIT: usize = 80;

/// Probe file used by the project validator to test write access
pub const WRITE_PROBE_FILE: &str = ".write_test";

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
