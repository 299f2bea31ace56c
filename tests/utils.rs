#![allow(dead_code)]

use cdn_localizer::config::Config;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const JQUERY_CDN: &str = "https://code.jquery.com/jquery-3.7.1.min.js";
pub const BOOTSTRAP_CSS_CDN: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";
pub const BOOTSTRAP_JS_CDN: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js";

pub fn base_page() -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
  <link href="{BOOTSTRAP_CSS_CDN}" rel="stylesheet">
</head>
<body>
  {{% block content %}}{{% endblock %}}
  <script src="{JQUERY_CDN}"></script>
  <script src="{BOOTSTRAP_JS_CDN}"></script>
</body>
</html>
"#
    )
}

/// The `cdn_mappings` section used across the integration tests.
pub fn mappings() -> serde_json::Value {
    json!({
        "bootstrap_css": {
            "pattern": r#"https://cdn\.jsdelivr\.net/npm/bootstrap@[\d.]+/dist/css/bootstrap\.min\.css"#,
            "replacement": "{% static 'css/bootstrap.min.css' %}",
            "description": "Bootstrap CSS"
        },
        "bootstrap_js": {
            "pattern": r#"https://cdn\.jsdelivr\.net/npm/bootstrap@[\d.]+/dist/js/bootstrap\.bundle\.min\.js"#,
            "replacement": "{% static 'js/bootstrap.bundle.min.js' %}"
        },
        "jquery": {
            "pattern": r#"https://code\.jquery\.com/jquery-[\d.]+\.min\.js"#,
            "replacement": "{% static 'js/jquery.min.js' %}"
        },
        "broken": {
            "pattern": "jquery-([",
            "replacement": "{% static 'js/never.js' %}"
        },
        "disabled": {
            "pattern": "unpkg\\.com",
            "replacement": "{% static 'js/unpkg.js' %}",
            "enabled": false
        }
    })
}

/// Creates a project tree with templates, and optionally the static files.
pub fn create_project(root: &Path, with_static: bool) {
    write(root.join("templates/base.html"), &base_page());
    write(root.join("templates/pages/about.html"), "<p>About us</p>\n");
    write(
        root.join("templates/partials/scripts.j2"),
        &format!("<script src='{JQUERY_CDN}'></script>\n"),
    );
    write(root.join("templates/readme.txt"), JQUERY_CDN);

    if with_static {
        for asset in ["css/bootstrap.min.css", "js/bootstrap.bundle.min.js", "js/jquery.min.js"] {
            write(root.join("static").join(asset), "/* vendored */\n");
        }
    }
}

pub fn write(path: PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Builds a configuration document for the given `(id, root, enabled)` projects.
pub fn config_for(projects: &[(&str, &Path, bool)], settings: serde_json::Value) -> Config {
    let mut table = serde_json::Map::new();
    for (id, root, enabled) in projects {
        table.insert(
            id.to_string(),
            json!({ "name": id.to_uppercase(), "path": root, "enabled": enabled }),
        );
    }
    let document = json!({
        "projects": table,
        "replacement_settings": settings,
        "cdn_mappings": mappings(),
    });
    Config::from_json_str(&document.to_string()).unwrap()
}

/// Directory entries of `root` whose name starts with `prefix`.
pub fn entries_with_prefix(root: &Path, prefix: &str) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(root)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with(prefix))
        .collect();
    found.sort();
    found
}
