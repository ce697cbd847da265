//! List rules command implementation.

use anyhow::Result;
use std::path::Path;

/// Runs the list-rules command.
pub fn run(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let workspace = super::open(path, config_path)?;
    let rules = workspace.config.build_rules(&workspace.project);

    println!("Configured rules:\n");
    println!("{:<30} Description", "Name");
    println!("{}", "-".repeat(80));

    for configured in &rules {
        println!(
            "{:<30} {}",
            configured.name,
            configured.rule.description()
        );
        if let Some(reason) = configured.rule.reason() {
            println!("{:<30} because: {reason}", "");
        }
    }

    println!("\n{} rule(s)", rules.len());
    Ok(())
}
