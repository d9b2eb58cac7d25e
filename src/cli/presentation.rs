//! CLI presentation: text and json formatters for run, plan and config.

use crate::config::PeriodicConfig;
use crate::error::ApiError;
use crate::run::{CadencePlan, CadenceReport, PlanReport, RunReport};
use comfy_table::Table;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidArgument(format!("Cannot serialize output: {}", e)))
}

fn cadence_title(report_cadence: &str) -> String {
    let mut chars = report_cadence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_cadence_report(output: &mut String, report: &CadenceReport) {
    let title = cadence_title(&report.cadence.to_string());
    if !report.enabled {
        output.push_str(&format!("{} notes: disabled\n", title));
        return;
    }
    output.push_str(&format!(
        "{} notes: {} created, {} already present, {} failed\n",
        title,
        report.created.len(),
        report.already_existing.len(),
        report.failures.len()
    ));
    for path in &report.created {
        output.push_str(&format!("  + {}\n", path));
    }
    for failure in &report.failures {
        output.push_str(&format!("  ! {}: {}\n", failure.path, failure.error));
    }
    for folder in &report.folder_failures {
        output.push_str(&format!("  ~ {}\n", folder));
    }
    if let Some(ref reason) = report.aborted {
        output.push_str(&format!("  Stopped: {}\n", reason));
    }
}

pub fn format_run_text(report: &RunReport) -> String {
    let mut output = format!("Run at {} ({})\n\n", report.now, report.timezone);
    push_cadence_report(&mut output, &report.daily);
    push_cadence_report(&mut output, &report.monthly);
    output.push_str(&format!("\nTotal: {} note(s) created", report.created_count()));
    output
}

pub fn format_run_json(report: &RunReport) -> Result<String, ApiError> {
    to_json(report)
}

fn push_cadence_plan(table: &mut Table, plan: &CadencePlan, notes: &mut Vec<String>) {
    let title = cadence_title(&plan.cadence.to_string());
    if !plan.enabled {
        notes.push(format!("{} notes: disabled", title));
        return;
    }
    if let Some(ref reason) = plan.aborted {
        notes.push(format!("{} notes: cannot run: {}", title, reason));
    }
    for entry in &plan.notes {
        table.add_row(vec![
            plan.cadence.to_string(),
            entry.label.clone(),
            entry.path.clone(),
            entry.created_at.clone(),
        ]);
    }
}

pub fn format_plan_text(plan: &PlanReport) -> String {
    let total = plan.daily.notes.len() + plan.monthly.notes.len();
    let mut output = format!("Plan at {} ({})\n", plan.now, plan.timezone);

    let mut remarks = Vec::new();
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Cadence", "Label", "Path", "Date token instant"]);
    push_cadence_plan(&mut table, &plan.daily, &mut remarks);
    push_cadence_plan(&mut table, &plan.monthly, &mut remarks);

    if total == 0 {
        output.push_str("\nNothing to create.");
    } else {
        output.push_str(&format!("\n{}\n\nTotal: {} note(s) to create", table, total));
    }
    for remark in remarks {
        output.push_str(&format!("\n{}", remark));
    }
    output
}

pub fn format_plan_json(plan: &PlanReport) -> Result<String, ApiError> {
    to_json(plan)
}

/// Effective configuration, as a TOML document.
pub fn format_config_toml(config: &PeriodicConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config)
        .map_err(|e| ApiError::ConfigError(format!("Cannot render configuration: {}", e)))
}
