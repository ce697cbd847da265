//! TOML configuration for architecture rules.
//!
//! `[analyzer]` says which tree to load, `[aliases]` maps import specifier
//! prefixes to project paths, and each `[[rules]]` entry becomes one
//! [`ArchRule`].

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use arch_unit_core::{classes, ArchRule, TypeScriptPackage, TypeScriptProject};

use crate::loader::{LoadError, ProjectLoader};
use crate::resolve::SpecifierResolver;

/// Top-level architecture rule configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchConfig {
    /// Which tree to load and how.
    #[serde(default)]
    pub analyzer: AnalyzerSection,

    /// Specifier prefix -> path relative to `base`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Rule definitions.
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// The `[analyzer]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerSection {
    /// Directory loaded as the project, relative to `base`.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory reported paths are relative to, relative to the config file.
    #[serde(default = "default_base")]
    pub base: PathBuf,

    /// Glob patterns to exclude, relative to `root`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to parse, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for AnalyzerSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            base: default_base(),
            exclude: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

/// One `[[rules]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDef {
    /// Rule name (kebab-case by convention).
    pub name: String,

    /// Selection: classes residing in any of these packages. Empty selects all.
    #[serde(default)]
    pub that_reside_in: Vec<String>,

    /// Allowed dependency target packages.
    #[serde(default)]
    pub only_depend_on: Vec<String>,

    /// Marker import identifying shared-kernel packages to add to
    /// `only_depend_on` (e.g. `SharedKernel`).
    #[serde(default)]
    pub shared_kernel: Option<String>,

    /// Forbidden dependency target packages.
    #[serde(default)]
    pub must_not_depend_on: Vec<String>,

    /// Reason reported on failure.
    #[serde(default)]
    pub because: Option<String>,
}

impl RuleDef {
    fn is_allow_list(&self) -> bool {
        !self.only_depend_on.is_empty() || self.shared_kernel.is_some()
    }

    /// Builds the rule; shared-kernel packages are looked up in the
    /// immediate child packages of `root`.
    #[must_use]
    pub fn to_rule(&self, root: TypeScriptPackage<'_>) -> ArchRule {
        let should = match self.that_reside_in.as_slice() {
            [] => classes().should(),
            [single] => classes().that().reside_in_a_package(single).should(),
            many => classes().that().reside_in_any_package(many).should(),
        };

        let rule = if self.is_allow_list() {
            let mut allowed = self.only_depend_on.clone();
            if let Some(marker) = &self.shared_kernel {
                allowed.extend(
                    root.shared_kernel_packages(marker)
                        .into_iter()
                        .map(|p| p.as_str().to_string()),
                );
            }
            should
                .only_depend_on_classes_that()
                .reside_in_any_package(&allowed)
        } else {
            should
                .not_depend_on_classes_that()
                .reside_in_any_package(&self.must_not_depend_on)
        };

        match &self.because {
            Some(reason) => rule.because(reason),
            None => rule,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_base() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec!["ts".to_string(), "tsx".to_string()]
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

impl ArchConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validate config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.analyzer.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("analyzer.exclude: '{pattern}': {e}"))
            })?;
        }

        let mut names = HashSet::new();
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.name.is_empty() {
                return Err(ConfigError::Validation(format!("rules[{i}]: empty name")));
            }
            if !names.insert(rule.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "rules[{i}]: duplicate name '{}'",
                    rule.name
                )));
            }
            match (rule.is_allow_list(), rule.must_not_depend_on.is_empty()) {
                (true, false) => {
                    return Err(ConfigError::Validation(format!(
                        "rules.{}: only_depend_on and must_not_depend_on are exclusive",
                        rule.name
                    )));
                }
                (false, true) => {
                    return Err(ConfigError::Validation(format!(
                        "rules.{}: needs only_depend_on, shared_kernel or must_not_depend_on",
                        rule.name
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Creates a loader for this config; `config_dir` anchors `base`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Glob`] if an exclude pattern is invalid.
    pub fn loader(&self, config_dir: &Path) -> Result<ProjectLoader, LoadError> {
        let base = if self.analyzer.base.is_absolute() {
            self.analyzer.base.clone()
        } else {
            config_dir.join(&self.analyzer.base)
        };
        let mut loader = ProjectLoader::new(base)
            .resolver(SpecifierResolver::new(self.aliases.clone()))
            .extensions(&self.analyzer.extensions);
        for pattern in &self.analyzer.exclude {
            loader = loader.exclude(pattern)?;
        }
        Ok(loader)
    }

    /// Builds every configured rule against `project`.
    #[must_use]
    pub fn build_rules(&self, project: &TypeScriptProject) -> Vec<ConfiguredRule> {
        self.rules
            .iter()
            .map(|def| ConfiguredRule {
                name: def.name.clone(),
                rule: def.to_rule(project.root()),
            })
            .collect()
    }
}

/// A rule built from configuration, with its name.
#[derive(Debug)]
pub struct ConfiguredRule {
    /// Name from `[[rules]]`.
    pub name: String,
    /// The built rule.
    pub rule: ArchRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[[rules]]
name = "domain-isolation"
that_reside_in = ["domain"]
only_depend_on = ["domain"]
"#;
        let config = ArchConfig::parse(toml).expect("parse failed");
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.analyzer.root, PathBuf::from("src"));
        assert_eq!(config.analyzer.extensions, vec!["ts", "tsx"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[analyzer]
root = "src/main/webapp"
base = ".."
exclude = ["**/*.spec.ts"]
extensions = ["ts"]

[aliases]
"@/" = "src/main/webapp/app/"

[[rules]]
name = "domain-isolation"
that_reside_in = ["domain"]
only_depend_on = ["domain"]
shared_kernel = "SharedKernel"
because = "Domain model should only depend on domains"

[[rules]]
name = "no-primary-in-secondary"
that_reside_in = ["secondary"]
must_not_depend_on = ["primary"]
"#;
        let config = ArchConfig::parse(toml).expect("parse failed");
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.aliases.get("@/").map(String::as_str), Some("src/main/webapp/app/"));
        assert_eq!(config.rules[0].shared_kernel.as_deref(), Some("SharedKernel"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_catches_exclusive_lists() {
        let toml = r#"
[[rules]]
name = "both"
only_depend_on = ["domain"]
must_not_depend_on = ["infrastructure"]
"#;
        let config = ArchConfig::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exclusive"));
    }

    #[test]
    fn validate_catches_missing_condition() {
        let toml = r#"
[[rules]]
name = "empty"
that_reside_in = ["domain"]
"#;
        let config = ArchConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_duplicate_names() {
        let toml = r#"
[[rules]]
name = "same"
only_depend_on = ["domain"]

[[rules]]
name = "same"
must_not_depend_on = ["primary"]
"#;
        let config = ArchConfig::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn validate_catches_bad_exclude_glob() {
        let toml = r#"
[analyzer]
exclude = ["[unclosed"]
"#;
        let config = ArchConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_section_value_is_a_parse_error() {
        assert!(ArchConfig::parse("rules = 3").is_err());
    }
}
