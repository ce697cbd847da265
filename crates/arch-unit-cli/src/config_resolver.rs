//! Locates `arch-unit.toml` and the folder its relative paths start from.
//!
//! Candidates, first existing file wins:
//!
//! 1. `--config <path>` (trusted as given, existence checked on load)
//! 2. `{project}/arch-unit.toml`, then `{project}/.arch-unit.toml`
//! 3. `$ARCH_UNIT_CONFIG_DIR/config.toml`, else `~/.arch-unit/config.toml`
//!
//! `[analyzer] base` is relative to the config file's folder, except for the
//! global config, which describes no particular tree and is anchored to the
//! checked project.

use std::path::{Path, PathBuf};

/// How a config file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Given with `--config`.
    Explicit,
    /// Found next to the checked project.
    Project,
    /// Found in the global config folder.
    Global,
}

/// A located config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Config file.
    pub path: PathBuf,
    /// How it was found.
    pub origin: Origin,
    /// Folder `[analyzer] base` is joined onto.
    pub anchor: PathBuf,
}

const PROJECT_CONFIG_NAMES: &[&str] = &["arch-unit.toml", ".arch-unit.toml"];

/// Finds the config for `project_dir`; `None` when there is none anywhere.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> Option<ResolvedConfig> {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> Option<ResolvedConfig> {
    if let Some(path) = explicit {
        return Some(ResolvedConfig {
            anchor: folder_of(path),
            path: path.to_path_buf(),
            origin: Origin::Explicit,
        });
    }

    let found = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| (project_dir.join(name), Origin::Project))
        .chain(global_dir.map(|dir| (dir.join("config.toml"), Origin::Global)))
        .find(|(path, _)| path.is_file())?;

    let (path, origin) = found;
    tracing::debug!("Using {:?} config: {}", origin, path.display());
    let anchor = match origin {
        Origin::Global => project_dir.to_path_buf(),
        Origin::Explicit | Origin::Project => folder_of(&path),
    };
    Some(ResolvedConfig {
        path,
        origin,
        anchor,
    })
}

/// Parent folder, `.` for a bare file name.
fn folder_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Global config folder: `$ARCH_UNIT_CONFIG_DIR`, else `~/.arch-unit/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ARCH_UNIT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".arch-unit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn project_config_is_anchored_to_its_folder() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".arch-unit.toml"), "").unwrap();

        let found = resolve_in(tmp.path(), None, None).unwrap();
        assert_eq!(found.origin, Origin::Project);
        assert_eq!(found.path, tmp.path().join(".arch-unit.toml"));
        assert_eq!(found.anchor, tmp.path());
    }

    #[test]
    fn default_project_dir_anchors_to_dot() {
        // `arch-unit check` with no PATH argument.
        let found = resolve_in(Path::new("."), Some(Path::new("./arch-unit.toml")), None).unwrap();
        assert_eq!(found.anchor, PathBuf::from("."));
        let bare = resolve_in(Path::new("."), Some(Path::new("arch-unit.toml")), None).unwrap();
        assert_eq!(bare.anchor, PathBuf::from("."));
    }

    #[test]
    fn explicit_config_elsewhere_anchors_to_its_own_folder() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("arch-unit.toml"), "").unwrap();
        let shared = TempDir::new().unwrap();
        let explicit = shared.path().join("rules/frontend.toml");

        let found = resolve_in(project.path(), Some(&explicit), None).unwrap();
        assert_eq!(found.origin, Origin::Explicit);
        assert_eq!(found.anchor, shared.path().join("rules"));
    }

    #[test]
    fn global_config_is_anchored_to_the_project() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let found = resolve_in(project.path(), None, Some(global.path())).unwrap();
        assert_eq!(found.origin, Origin::Global);
        assert_eq!(found.path, global.path().join("config.toml"));
        assert_eq!(found.anchor, project.path());
    }

    #[test]
    fn folder_named_like_a_config_is_skipped() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("arch-unit.toml")).unwrap();
        fs::write(project.path().join(".arch-unit.toml"), "").unwrap();

        let found = resolve_in(project.path(), None, None).unwrap();
        assert_eq!(found.path, project.path().join(".arch-unit.toml"));
    }

    #[test]
    fn nothing_found_anywhere() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert!(resolve_in(project.path(), None, Some(global.path())).is_none());
    }
}
