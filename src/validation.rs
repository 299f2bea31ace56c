//! Pre-flight validation of a project's layout.

use crate::assets;
use crate::config::Project;
use crate::constants::WRITE_PROBE_FILE;
use crate::discovery::discover;
use crate::mapping::MappingTable;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectValidation {
    pub findings: Vec<Finding>,
}

impl ProjectValidation {
    fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.findings.push(Finding { severity, message: message.into() });
    }

    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(|f| f.severity == Severity::Critical)
    }
}

/// Inspects the project root, templates, static assets and write access.
pub fn validate_project(project: &Project, table: &MappingTable) -> ProjectValidation {
    let mut validation = ProjectValidation::default();

    let root = project.root();
    if !root.is_dir() {
        validation.push(
            Severity::Critical,
            format!("project path does not exist: {}", root.display()),
        );
        return validation;
    }

    let templates_dir = project.templates_dir();
    if !templates_dir.is_dir() {
        validation.push(
            Severity::Warning,
            format!("templates directory not found: {}", templates_dir.display()),
        );
    } else {
        match discover(&templates_dir) {
            Ok(discovery) if discovery.files.is_empty() => {
                validation.push(Severity::Warning, "no template files found")
            }
            Ok(discovery) => validation.push(
                Severity::Ok,
                format!("{} template file(s) found", discovery.files.len()),
            ),
            Err(e) => validation.push(Severity::Warning, format!("cannot scan templates: {e}")),
        }
    }

    let static_dir = project.static_dir();
    if !static_dir.is_dir() {
        validation.push(
            Severity::Warning,
            format!("static directory not found: {}", static_dir.display()),
        );
        validation.push(
            Severity::Warning,
            format!("place the local copies of CDN assets under {}", static_dir.display()),
        );
    } else {
        let report = assets::check(table.rules(), &static_dir);
        let missing = report.missing().len();
        let total = report.entries.len();
        let severity = if missing == 0 { Severity::Ok } else { Severity::Warning };
        validation.push(
            severity,
            format!("{} of {total} mapped static file(s) present", total - missing),
        );
    }

    let probe = root.join(WRITE_PROBE_FILE);
    match std::fs::write(&probe, b"").and_then(|_| std::fs::remove_file(&probe)) {
        Ok(()) => validation.push(Severity::Ok, "project directory is writable"),
        Err(e) => validation.push(Severity::Critical, format!("cannot write to project: {e}")),
    }

    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ioutils::write_file;
    use crate::mapping::Rule;
    use tempfile::TempDir;

    fn project(root: &std::path::Path) -> Project {
        Project {
            id: "p".into(),
            name: "P".into(),
            root_path: root.to_path_buf(),
            templates_subdir: "templates".into(),
            static_subdir: "static".into(),
            enabled: true,
        }
    }

    fn table() -> MappingTable {
        MappingTable::from_rules(vec![
            Rule::new("jq", "jquery", "{% static 'js/jquery.min.js' %}").unwrap(),
            Rule::new("bs", "bootstrap", "{% static 'css/bootstrap.min.css' %}").unwrap(),
        ])
    }

    #[test]
    fn missing_root_is_critical() {
        let dir = TempDir::new().unwrap();
        let validation = validate_project(&project(&dir.path().join("absent")), &table());
        assert!(!validation.is_valid());
        assert_eq!(validation.findings.len(), 1);
        assert_eq!(validation.findings[0].severity, Severity::Critical);
    }

    #[test]
    fn empty_project_has_only_warnings() {
        let dir = TempDir::new().unwrap();
        let validation = validate_project(&project(dir.path()), &table());
        assert!(validation.is_valid());
        assert!(validation.findings.iter().any(|f| f.severity == Severity::Warning));
        assert!(!dir.path().join(WRITE_PROBE_FILE).exists());
    }

    #[test]
    fn healthy_project_reports_counts() {
        let dir = TempDir::new().unwrap();
        write_file("<p></p>", dir.path().join("templates/index.html")).unwrap();
        write_file("x", dir.path().join("static/js/jquery.min.js")).unwrap();

        let validation = validate_project(&project(dir.path()), &table());
        assert!(validation.is_valid());
        let messages: Vec<_> = validation.findings.iter().map(|f| f.message.as_str()).collect();
        assert!(messages.contains(&"1 template file(s) found"));
        assert!(messages.contains(&"1 of 2 mapped static file(s) present"));
        assert!(messages.contains(&"project directory is writable"));
    }
}
