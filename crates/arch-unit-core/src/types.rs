//! Value objects identifying packages and files inside a project.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised when a value object invariant does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A package name was empty.
    #[error("package name must not be empty")]
    EmptyPackageName,

    /// A source directory could not be turned into a package.
    #[error("invalid directory {path}")]
    Directory {
        /// Path reported by the source tree.
        path: String,
        /// Underlying invariant failure.
        source: Box<ModelError>,
    },
}

/// Name of a package (one folder of the source tree).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageName(String);

impl PackageName {
    /// Creates a package name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyPackageName`] if `name` is empty.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::EmptyPackageName);
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for PackageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PackageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A `/`-separated path relative to the project base, always with a
/// leading `/` and never with a trailing one (except for the bare root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelativePath(String);

impl RelativePath {
    /// Normalizes `path` into a relative path.
    ///
    /// Backslashes become `/`, empty and `.` segments are dropped.
    #[must_use]
    pub fn of(path: &str) -> Self {
        let replaced = path.replace('\\', "/");
        let segments: Vec<&str> = replaced
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        Self(format!("/{}", segments.join("/")))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring test used by package filters.
    #[must_use]
    pub fn contains(&self, fragment: &str) -> bool {
        self.0.contains(fragment)
    }

    /// Path of the enclosing folder; the root is its own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self.0.rfind('/') {
            Some(0) | None => Self("/".to_string()),
            Some(idx) => Self(self.0[..idx].to_string()),
        }
    }

    /// Last path segment, empty for the root.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Appends a child segment (or sub-path).
    #[must_use]
    pub fn join(&self, child: &str) -> Self {
        Self::of(&format!("{}/{child}", self.0))
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
