//! Shared output formatting for check results.

use anyhow::Result;
use arch_unit_core::ArchRuleError;
use serde::Serialize;

use crate::OutputFormat;

/// Outcome of one configured rule.
#[derive(Debug, Serialize)]
pub struct RuleOutcome {
    /// Rule name from config.
    pub name: String,
    /// Generated rule description.
    pub description: String,
    /// Whether the rule held.
    pub passed: bool,
    /// Aggregate failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Individual violation messages.
    pub violations: Vec<String>,
    /// Failure, for rendering as a diagnostic.
    #[serde(skip)]
    pub error: Option<ArchRuleError>,
}

/// Outcome of a whole check run.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Number of classes in the loaded project.
    pub classes_checked: usize,
    /// One entry per configured rule, in config order.
    pub rules: Vec<RuleOutcome>,
}

impl CheckReport {
    /// Number of rules that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.rules.iter().filter(|r| !r.passed).count()
    }
}

/// Print check results in the specified format.
pub fn print(report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => {
            for line in compact_lines(report) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn print_text(report: &CheckReport) {
    for rule in &report.rules {
        if rule.passed {
            println!("\x1b[32mPASS\x1b[0m {}", rule.name);
            continue;
        }
        println!("\x1b[31mFAIL\x1b[0m {}", rule.name);
        if let Some(error) = &rule.error {
            println!("{:?}", miette::Report::new(error.clone()));
        }
    }

    let failed = report.failed();
    let summary_color = if failed > 0 { "\x1b[31m" } else { "\x1b[32m" };
    println!(
        "{}Checked {} rule(s) over {} class(es): {} failed\x1b[0m",
        summary_color,
        report.rules.len(),
        report.classes_checked,
        failed
    );
}

fn print_json(report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn compact_lines(report: &CheckReport) -> Vec<String> {
    report
        .rules
        .iter()
        .flat_map(|rule| {
            rule.violations
                .iter()
                .map(move |v| format!("{}: {v}", rule.name))
        })
        .collect()
}
