//! JSON schema of the configuration document

use crate::error::{Error, Result};

const CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "version": { "type": "string" },
    "default_project": { "type": "string" },
    "projects": {
      "type": "object",
      "additionalProperties": {
        "type": "object",
        "required": ["path"],
        "properties": {
          "name": { "type": "string" },
          "path": { "type": "string", "minLength": 1 },
          "templates_dir": { "type": "string" },
          "static_dir": { "type": "string" },
          "enabled": { "type": "boolean" }
        }
      }
    },
    "replacement_settings": {
      "type": "object",
      "properties": {
        "create_backup": { "type": "boolean" },
        "backup_dir_name": { "type": "string", "minLength": 1 },
        "save_log": { "type": "boolean" },
        "log_dir": { "type": "string" },
        "dry_run_first": { "type": "boolean" },
        "replace_mode": { "enum": ["all_occurrences", "matched_span"] },
        "log_format": { "enum": ["json", "yaml"] },
        "verify_backup": { "type": "boolean" }
      }
    },
    "cdn_mappings": {
      "type": "object",
      "additionalProperties": {
        "type": "object",
        "required": ["pattern", "replacement"],
        "properties": {
          "pattern": { "type": "string", "minLength": 1 },
          "replacement": { "type": "string" },
          "enabled": { "type": "boolean" },
          "description": { "type": "string" },
          "local_path": { "type": "string" }
        }
      }
    }
  }
}"#;

/// Validate a configuration document against the embedded schema.
pub fn validate_document(document: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value = serde_json::from_str(CONFIG_SCHEMA)?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| {
        Error::Other(anyhow::anyhow!("Invalid configuration schema: {}", e))
    })?;

    let errors: Vec<String> =
        validator.iter_errors(document).map(|error| format!("{error}")).collect();

    if !errors.is_empty() {
        return Err(Error::ConfigValidation(errors.join("; ")));
    }

    Ok(())
}
