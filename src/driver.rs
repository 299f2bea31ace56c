//! Runs the batch orchestrator across projects and aggregates the outcomes.

use crate::config::{Project, Settings};
use crate::error::Error;
use crate::mapping::MappingTable;
use crate::orchestrator::{ProjectOutcome, ProjectRun, RunOptions};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Success,
    Failed,
    Error,
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectStatus::Success => "success",
            ProjectStatus::Failed => "failed",
            ProjectStatus::Error => "error",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectDetail {
    Outcome(Box<ProjectOutcome>),
    /// `reason` is a short code such as `backup_failed`, `message` the full error.
    Failure { reason: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectResult {
    pub project_id: String,
    pub project_name: String,
    pub status: ProjectStatus,
    pub detail: ProjectDetail,
}

impl ProjectResult {
    fn from_run(project: &Project, result: crate::error::Result<ProjectOutcome>) -> Self {
        let (status, detail) = match result {
            Ok(outcome) => (ProjectStatus::Success, ProjectDetail::Outcome(Box::new(outcome))),
            Err(e) => {
                let status = if e.is_project_failure() {
                    ProjectStatus::Failed
                } else {
                    ProjectStatus::Error
                };
                log_failure(project, &e);
                (status, ProjectDetail::Failure { reason: e.reason(), message: e.to_string() })
            }
        };

        Self {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            status,
            detail,
        }
    }

    pub fn outcome(&self) -> Option<&ProjectOutcome> {
        match &self.detail {
            ProjectDetail::Outcome(outcome) => Some(outcome.as_ref()),
            ProjectDetail::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.detail {
            ProjectDetail::Failure { reason, .. } => Some(reason.as_str()),
            ProjectDetail::Outcome(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            ProjectDetail::Failure { message, .. } => Some(message.as_str()),
            ProjectDetail::Outcome(_) => None,
        }
    }
}

fn log_failure(project: &Project, e: &Error) {
    if e.is_project_failure() {
        log::warn!("Project '{}' skipped: {e}", project.id);
    } else {
        log::error!("Project '{}' failed: {e}", project.id);
    }
}

/// Final report of a multi-project run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub results: Vec<ProjectResult>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn count(&self, status: ProjectStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn get(&self, project_id: &str) -> Option<&ProjectResult> {
        self.results.iter().find(|r| r.project_id == project_id)
    }
}

/// Runs a single project and classifies the result.
pub fn run_one(
    project: &Project,
    table: &MappingTable,
    settings: &Settings,
    options: RunOptions,
) -> ProjectResult {
    let result = ProjectRun::new(project, table, settings, options).run();
    ProjectResult::from_run(project, result)
}

/// Runs every enabled project in order. A failing project never stops the others.
pub fn run_all(
    projects: &[Project],
    table: &MappingTable,
    settings: &Settings,
    options: RunOptions,
) -> Report {
    let enabled: Vec<&Project> = projects.iter().filter(|p| p.enabled).collect();
    let total = enabled.len();

    let results = enabled
        .into_iter()
        .enumerate()
        .map(|(i, project)| {
            log::info!("Project {}/{total}: {}", i + 1, project.name);
            run_one(project, table, settings, options)
        })
        .collect();

    Report { results }
}
