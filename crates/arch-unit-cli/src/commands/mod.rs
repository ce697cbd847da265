//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use arch_unit_core::TypeScriptProject;
use arch_unit_ts::ArchConfig;
use std::path::Path;

use crate::config_resolver::{self, Origin, ResolvedConfig};

/// A validated config together with the project it describes.
pub struct Workspace {
    /// Parsed and validated config.
    pub config: ArchConfig,
    /// Project graph loaded from `[analyzer]`.
    pub project: TypeScriptProject,
}

/// Resolves, validates and loads the config for `path`, then loads the
/// project tree it points at.
pub fn open(path: &Path, explicit: Option<&Path>) -> Result<Workspace> {
    let Some(resolved) = config_resolver::resolve(path, explicit) else {
        anyhow::bail!("No arch-unit.toml found. Run `arch-unit init` to create one.");
    };
    let config = load_config(&resolved)?;
    config.validate().context("Config validation failed")?;

    let loader = config
        .loader(&resolved.anchor)
        .context("Invalid [analyzer] section")?;
    let project = loader
        .load(&config.analyzer.root)
        .with_context(|| format!("Failed to load {}", config.analyzer.root.display()))?;

    tracing::info!(
        "Loaded {} classes in {} packages",
        project.class_count(),
        project.package_count()
    );

    Ok(Workspace { config, project })
}

fn load_config(resolved: &ResolvedConfig) -> Result<ArchConfig> {
    let p = &resolved.path;
    if resolved.origin == Origin::Global {
        tracing::info!("Using global config: {}", p.display());
    }
    ArchConfig::from_file(p).with_context(|| format!("Failed to load {}", p.display()))
}
