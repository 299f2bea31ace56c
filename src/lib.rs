/// Handles argument parsing and command dispatch.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Configuration document handling.
pub mod config;

/// Application-wide constants.
pub mod constants;

/// The mapping table of CDN rewrite rules.
pub mod mapping;

/// Template file discovery.
pub mod discovery;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Backups of template directories.
pub mod backup;

/// Static asset checks and placeholders.
pub mod assets;

/// The rewrite engine.
pub mod rewrite;

/// Per-project run statistics.
pub mod stats;

/// Persisted run logs.
pub mod runlog;

/// Processing of a single project.
pub mod orchestrator;

/// Processing of several projects.
pub mod driver;

/// Project layout validation.
pub mod validation;

/// User interaction handling.
pub mod prompt;
