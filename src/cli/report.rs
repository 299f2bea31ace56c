//! Console rendering of run results.

use crate::assets::AssetReport;
use crate::driver::{ProjectResult, ProjectStatus, Report};
use crate::mapping::RejectedRule;
use crate::orchestrator::ProjectOutcome;
use crate::validation::{ProjectValidation, Severity};

const RULE: &str = "======================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------------";

pub fn print_rejected(rejected: &[RejectedRule]) {
    for rule in rejected {
        println!("Skipping mapping '{}': {}", rule.name, rule.reason);
    }
}

pub fn print_outcome(outcome: &ProjectOutcome) {
    println!("{RULE}");
    println!("Project: {} ({})", outcome.project_name, outcome.project_id);
    println!("{RULE}");

    if let Some(backup) = &outcome.backup_dir {
        println!("Backup:  {}", backup.display());
    }

    if outcome.dry_run {
        for prediction in &outcome.predictions {
            println!("  {} ({} possible changes)", prediction.file, prediction.total);
            for (rule, count) in &prediction.by_rule {
                println!("      {rule}: {count}");
            }
        }
    } else {
        for change in &outcome.changes {
            println!("  {} ({} changes)", change.file, change.replacement_count);
        }
    }

    let stats = &outcome.stats;
    println!("{THIN_RULE}");
    println!("Scanned:      {}", stats.files_scanned);
    if outcome.dry_run {
        let total: usize = outcome.predictions.iter().map(|p| p.total).sum();
        println!("Would change: {} file(s), {total} replacement(s)", outcome.predictions.len());
    } else {
        println!("Modified:     {}", stats.files_modified);
        println!("Replacements: {}", stats.replacements_made);
    }
    if !stats.missing_files.is_empty() {
        println!("Missing:      {}", stats.missing_files.join(", "));
    }
    if !stats.copied_files.is_empty() {
        println!("Placeholders: {}", stats.copied_files.len());
    }
    println!("Errors:       {}", stats.errors);
    if let Some(log_file) = &outcome.log_file {
        println!("Log:          {}", log_file.display());
    }
    println!();
}

fn print_result(result: &ProjectResult) {
    match result.outcome() {
        Some(outcome) => print_outcome(outcome),
        None => println!(
            "Project {}: {} ({})\n",
            result.project_id,
            result.status,
            result.message().unwrap_or_default()
        ),
    }
}

pub fn print_report(report: &Report) {
    for result in &report.results {
        print_result(result);
    }

    println!("{RULE}");
    println!("Summary");
    println!("{RULE}");
    println!("Projects: {}", report.total());
    println!("Success:  {}", report.count(ProjectStatus::Success));
    println!("Failed:   {}", report.count(ProjectStatus::Failed));
    println!("Error:    {}", report.count(ProjectStatus::Error));

    let successes: Vec<_> =
        report.results.iter().filter(|r| r.status == ProjectStatus::Success).collect();
    if !successes.is_empty() {
        println!("{THIN_RULE}");
        for result in successes {
            if let Some(outcome) = result.outcome() {
                println!(
                    "  {}: {} file(s) modified, {} replacement(s)",
                    result.project_id,
                    outcome.stats.files_modified,
                    outcome.stats.replacements_made
                );
            }
        }
    }

    let failures: Vec<_> =
        report.results.iter().filter(|r| r.status != ProjectStatus::Success).collect();
    if !failures.is_empty() {
        println!("{THIN_RULE}");
        for result in failures {
            println!("  {}: {}", result.project_id, result.reason().unwrap_or("unknown"));
        }
    }
    println!("{RULE}");
}

pub fn print_assets(project_id: &str, report: &AssetReport) {
    println!("Static files for {project_id}:");
    for entry in &report.entries {
        let mark = if entry.present { "ok     " } else { "missing" };
        println!("  [{mark}] {} ({})", entry.local_path, entry.rule_name);
    }
    if report.ok() {
        println!("All mapped static files are present.");
    } else {
        println!("{} file(s) missing.", report.missing().len());
    }
    println!();
}

pub fn print_validation(project_id: &str, validation: &ProjectValidation) {
    println!("{project_id}");
    println!("{THIN_RULE}");
    for finding in &validation.findings {
        let mark = match finding.severity {
            Severity::Ok => "ok",
            Severity::Warning => "warn",
            Severity::Critical => "FAIL",
        };
        println!("  [{mark}] {}", finding.message);
    }
    if validation.is_valid() {
        println!("Project {project_id} is ready.");
    } else {
        println!("Project {project_id} has problems that must be fixed.");
    }
    println!();
}
