//! Configuration management
//!
//! This module contains the configuration system components:
//! - `types`: serde types of the document plus the `Project` and `Settings` snapshots
//! - `schema`: JSON schema validation of the raw document
//! - `loader`: configuration file loading, parsing and the default document

pub mod loader;
pub mod schema;
pub mod types;


pub use loader::Config;
pub use types::{LogFormat, MappingConfig, Project, ProjectConfig, ReplaceMode, Settings};
