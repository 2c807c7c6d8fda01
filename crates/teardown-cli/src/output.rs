//! Formatted output helpers for CLI commands.

use std::fmt::Write as _;
use std::path::Path;

use teardown_runtime::plan::TeardownPlan;
use teardown_runtime::report::TeardownReport;

/// Formats the plan as a numbered table of steps and targets.
#[must_use]
pub fn format_plan(plan: &TeardownPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<4} {:<10} {:<20} {}", "#", "KIND", "TARGET", "LABEL");
    for (i, step) in plan.steps.iter().enumerate() {
        let target = step.target.as_ref().map_or_else(
            || "-".to_string(),
            |name| {
                if name.is_empty() {
                    "<unset>".to_string()
                } else {
                    name.to_string()
                }
            },
        );
        let _ = writeln!(
            out,
            "{:<4} {:<10} {:<20} {}",
            i + 1,
            step.kind.to_string(),
            target,
            step.label
        );
    }
    out
}

/// Writes the report as pretty JSON to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn write_report(path: &Path, report: &TeardownReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}
