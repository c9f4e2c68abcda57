//! Formatting and reporting for validation results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::ValidationReport;

/// Formats a validation report as a pretty table
pub fn format_report(report: &ValidationReport) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Invariant", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        let duration_str = format!("{:.2?}", result.duration);
        builder.push_record([
            name.as_str(),
            &result.status.as_colored_str(),
            &duration_str,
            &result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = String::new();
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format_summary(report));

    output
}

/// Prints a validation report to stdout
pub fn print_report(report: &ValidationReport) {
    println!("{}", format_report(report));
}

fn format_summary(report: &ValidationReport) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));

    if report.warned > 0 {
        summary.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned));
    }

    if report.failed > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    summary.push('\n');
    if report.is_valid() {
        if report.has_warnings() {
            summary.push_str(&format!(
                "  {}\n",
                "Story: VALID (with warnings)".yellow().bold()
            ));
        } else {
            summary.push_str(&format!("  {}\n", "Story: VALID".green().bold()));
        }
    } else {
        summary.push_str(&format!("  {}\n", "Story: REJECTED".red().bold()));
    }

    summary
}
