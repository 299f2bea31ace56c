mod utils;

use cdn_localizer::cli::{run, CheckArgs, Cli, Commands, RunArgs, SelectArgs};
use cdn_localizer::config::Config;
use cdn_localizer::error::Error;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_log::test;
use utils::*;

/// Writes a config file for one enabled project rooted at `project_root`.
fn write_config(dir: &Path, project_root: &Path) -> PathBuf {
    let path = dir.join("config.json");
    let document = json!({
        "projects": {
            "site": { "name": "Site", "path": project_root, "enabled": true },
            "legacy": { "path": dir.join("legacy"), "enabled": false }
        },
        "replacement_settings": { "dry_run_first": true },
        "cdn_mappings": mappings(),
    });
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

fn cli(config: &Path, command: Commands) -> Cli {
    Cli { config: config.to_path_buf(), verbose: 0, command }
}

#[test]
fn run_with_yes_rewrites_enabled_projects() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path().join("site");
    create_project(&root, true);
    let config = write_config(workspace.path(), &root);

    let args = RunArgs { yes: true, ..RunArgs::default() };
    run(cli(&config, Commands::Run(args))).unwrap();

    let base = fs::read_to_string(root.join("templates/base.html")).unwrap();
    assert!(!base.contains(JQUERY_CDN));
    assert!(!base.contains(BOOTSTRAP_CSS_CDN));
    assert_eq!(entries_with_prefix(&root, "backup_").len(), 1);
    assert_eq!(entries_with_prefix(&root.join("logs"), "replacement_log_").len(), 1);
    assert!(!workspace.path().join("legacy").exists());
}

#[test]
fn dry_run_command_changes_nothing() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path().join("site");
    create_project(&root, true);
    let config = write_config(workspace.path(), &root);

    run(cli(&config, Commands::DryRun(SelectArgs::default()))).unwrap();

    assert_eq!(fs::read_to_string(root.join("templates/base.html")).unwrap(), base_page());
    assert!(entries_with_prefix(&root, "backup_").is_empty());
    assert!(!root.join("logs").exists());
}

#[test]
fn check_creates_placeholders_on_request() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path().join("site");
    create_project(&root, false);
    let config = write_config(workspace.path(), &root);

    let args = CheckArgs { placeholders: true, ..CheckArgs::default() };
    run(cli(&config, Commands::Check(args))).unwrap();

    let css = fs::read_to_string(root.join("static/css/bootstrap.min.css")).unwrap();
    assert!(css.starts_with("/* Placeholder for bootstrap_css */"));
    assert!(root.join("static/js/bootstrap.bundle.min.js").is_file());
    assert!(root.join("static/js/jquery.min.js").is_file());
    // Templates are never touched by a check.
    assert_eq!(fs::read_to_string(root.join("templates/base.html")).unwrap(), base_page());
}

#[test]
fn named_disabled_project_is_still_processed() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path().join("site");
    create_project(&root, true);
    let config = write_config(workspace.path(), &root);
    create_project(&workspace.path().join("legacy"), true);

    let args = RunArgs {
        select: SelectArgs { project: Some("legacy".into()) },
        yes: true,
        ..RunArgs::default()
    };
    run(cli(&config, Commands::Run(args))).unwrap();

    let legacy = fs::read_to_string(workspace.path().join("legacy/templates/base.html")).unwrap();
    assert!(!legacy.contains(JQUERY_CDN));
    assert_eq!(fs::read_to_string(root.join("templates/base.html")).unwrap(), base_page());
}

#[test]
fn init_refuses_to_overwrite() {
    let workspace = TempDir::new().unwrap();
    let config = workspace.path().join("config.json");
    run(cli(&config, Commands::Init)).unwrap();
    let written = Config::load(&config).unwrap();
    assert!(written.projects.contains_key("my_project"));

    let err = run(cli(&config, Commands::Init)).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
}
