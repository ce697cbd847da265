//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# arch-unit configuration

[analyzer]
# Folder loaded as the project, relative to `base`.
root = "src/main/webapp/app"
# Reported paths are relative to this folder (relative to this file).
base = "."
exclude = ["**/*.spec.ts", "**/node_modules/**"]
extensions = ["ts", "tsx"]

# Import specifier prefixes mapped to folders under `base`.
[aliases]
"@/" = "src/main/webapp/app/"

# Each rule selects classes by package and constrains what they depend on.
# A package matches when its path contains the given name.

[[rules]]
name = "domain-isolation"
that_reside_in = ["domain"]
only_depend_on = ["domain"]
# Packages whose package-info.ts imports this marker are allowed too.
shared_kernel = "SharedKernel"
because = "Domain model should only depend on domains and a very limited set of external dependencies"

[[rules]]
name = "secondary-not-primary"
that_reside_in = ["secondary"]
must_not_depend_on = ["primary"]
because = "Secondary adapters should not call primary adapters"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_template(Path::new("arch-unit.toml"), force)?;

    println!("Created arch-unit.toml");
    println!();
    println!("Next steps:");
    println!("  1. Point [analyzer] root at your sources");
    println!("  2. Edit [[rules]] for your project");
    println!("  3. Run: arch-unit check");

    Ok(())
}

fn write_template(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, CONFIG_TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_unit_ts::ArchConfig;
    use tempfile::TempDir;

    #[test]
    fn template_is_a_valid_config() {
        let config = ArchConfig::parse(CONFIG_TEMPLATE).unwrap();
        config.validate().unwrap();
        assert_eq!(config.rules.len(), 2);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("arch-unit.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_template(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_template(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }
}
