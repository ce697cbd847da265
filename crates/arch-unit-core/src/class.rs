//! Graph nodes: one class per source file and its outgoing edges.

use serde::Serialize;

use crate::types::RelativePath;

/// Index of a class inside its [`TypeScriptProject`](crate::TypeScriptProject) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    /// Returns the raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge from a class to another class of the same project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    target: ClassId,
    name: String,
    path: RelativePath,
}

impl Dependency {
    pub(crate) fn new(target: ClassId, name: String, path: RelativePath) -> Self {
        Self { target, name, path }
    }

    /// Arena id of the target class.
    #[must_use]
    pub fn target(&self) -> ClassId {
        self.target
    }

    /// Name of the target class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the target class.
    #[must_use]
    pub fn path(&self) -> &RelativePath {
        &self.path
    }
}

/// A graph node mapped from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeScriptClass {
    name: String,
    path: RelativePath,
    package_path: RelativePath,
    dependencies: Vec<Dependency>,
    imported_names: Vec<String>,
}

impl TypeScriptClass {
    /// Creates a class; its package path is the parent folder of `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, path: &str, dependencies: Vec<Dependency>) -> Self {
        let path = RelativePath::of(path);
        Self {
            name: name.into(),
            package_path: path.parent(),
            path,
            dependencies,
            imported_names: Vec::new(),
        }
    }

    /// Builds the dependency-free stand-in for an edge target, carrying only
    /// its identity and location.
    #[must_use]
    pub fn from_dependency(dependency: &Dependency) -> Self {
        Self::new(dependency.name(), dependency.path().as_str(), Vec::new())
    }

    #[must_use]
    pub(crate) fn with_imported_names(mut self, names: Vec<String>) -> Self {
        self.imported_names = names;
        self
    }

    /// File identifier, e.g. `Basket.ts`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Path of the folder holding the file.
    #[must_use]
    pub fn package_path(&self) -> &RelativePath {
        &self.package_path
    }

    /// Outgoing edges, in import statement order.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Whether one of the file's import statements binds `name`.
    #[must_use]
    pub fn has_import(&self, name: &str) -> bool {
        self.imported_names.iter().any(|n| n == name)
    }
}
