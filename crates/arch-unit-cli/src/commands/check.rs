//! Check command implementation.

use anyhow::Result;
use arch_unit_core::TypeScriptProject;
use arch_unit_ts::ArchConfig;
use std::path::Path;

use super::output::{CheckReport, RuleOutcome};
use crate::OutputFormat;

/// Runs the check command.
pub fn run(path: &Path, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    let workspace = super::open(path, config_path)?;

    tracing::info!("Checking {} rule(s)", workspace.config.rules.len());
    let report = evaluate(&workspace.config, &workspace.project);

    super::output::print(&report, format)?;

    if report.failed() > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Checks every configured rule against `project`.
pub fn evaluate(config: &ArchConfig, project: &TypeScriptProject) -> CheckReport {
    let classes = project.root().all_classes();
    let rules = config
        .build_rules(project)
        .into_iter()
        .map(|configured| {
            let description = configured.rule.description();
            match configured.rule.check(classes.iter().copied()) {
                Ok(()) => RuleOutcome {
                    name: configured.name,
                    description,
                    passed: true,
                    message: None,
                    violations: Vec::new(),
                    error: None,
                },
                Err(error) => RuleOutcome {
                    name: configured.name,
                    description,
                    passed: false,
                    message: Some(error.to_string()),
                    violations: error.violations().to_vec(),
                    error: Some(error),
                },
            }
        })
        .collect();

    CheckReport {
        classes_checked: classes.len(),
        rules,
    }
}
