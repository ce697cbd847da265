//! Project graph: an arena of packages and classes built once from a
//! source-tree snapshot and read-only afterwards.
//!
//! Packages and classes are stored in flat vectors and addressed by index,
//! so traversals run on an explicit stack instead of recursing through
//! owned children. [`TypeScriptPackage`] is a cheap `Copy` view onto one
//! package node.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use crate::class::{ClassId, Dependency, TypeScriptClass};
use crate::source::{SourceDirectory, SourceFile};
use crate::types::{ModelError, PackageName, RelativePath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PackageId(usize);

const ROOT: PackageId = PackageId(0);

#[derive(Debug)]
struct PackageNode {
    name: PackageName,
    path: RelativePath,
    packages: Vec<PackageId>,
    classes: Vec<ClassId>,
}

/// Root of a project graph.
#[derive(Debug)]
pub struct TypeScriptProject {
    packages: Vec<PackageNode>,
    classes: Vec<TypeScriptClass>,
}

impl TypeScriptProject {
    /// Builds the graph from a source-tree snapshot rooted at `root`.
    ///
    /// Import targets that do not name a file of the tree are dropped, and
    /// repeated targets within one file keep only their first occurrence.
    /// Cycles are legal.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Directory`] if a folder has an empty base name.
    pub fn from_source<D: SourceDirectory>(root: &D) -> Result<Self, ModelError> {
        let mut packages: Vec<PackageNode> = Vec::new();
        let mut files: Vec<&D::File> = Vec::new();
        let mut stack: Vec<(&D, Option<PackageId>)> = vec![(root, None)];

        while let Some((dir, parent)) = stack.pop() {
            let id = PackageId(packages.len());
            let name = PackageName::new(dir.base_name()).map_err(|e| ModelError::Directory {
                path: dir.path().to_string(),
                source: Box::new(e),
            })?;

            let mut classes = Vec::with_capacity(dir.source_files().len());
            for file in dir.source_files() {
                classes.push(ClassId(files.len()));
                files.push(file);
            }

            packages.push(PackageNode {
                name,
                path: RelativePath::of(dir.path()),
                packages: Vec::new(),
                classes,
            });
            if let Some(parent) = parent {
                packages[parent.0].packages.push(id);
            }

            // Reversed so that siblings pop in enumeration order.
            for child in dir.directories().iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        let index: HashMap<RelativePath, ClassId> = files
            .iter()
            .enumerate()
            .map(|(i, f)| (RelativePath::of(f.path()), ClassId(i)))
            .collect();

        let classes = files
            .iter()
            .enumerate()
            .map(|(own, file)| {
                // Seeded with the file itself: self-imports are not edges.
                let mut seen = HashSet::from([ClassId(own)]);
                let mut dependencies = Vec::new();
                for target in file.import_targets() {
                    let target_path = RelativePath::of(target);
                    let Some(&target_id) = index.get(&target_path) else {
                        trace!(from = file.path(), target = %target_path, "import outside project");
                        continue;
                    };
                    if seen.insert(target_id) {
                        let target_file = files[target_id.0];
                        dependencies.push(Dependency::new(
                            target_id,
                            target_file.name().to_string(),
                            target_path,
                        ));
                    }
                }
                TypeScriptClass::new(file.name(), file.path(), dependencies)
                    .with_imported_names(file.imported_names().to_vec())
            })
            .collect::<Vec<_>>();

        let project = Self { packages, classes };
        debug!(
            packages = project.packages.len(),
            classes = project.classes.len(),
            dependencies = project.classes.iter().map(|c| c.dependencies().len()).sum::<usize>(),
            "built project graph"
        );
        Ok(project)
    }

    /// Root package of the project.
    #[must_use]
    pub fn root(&self) -> TypeScriptPackage<'_> {
        TypeScriptPackage {
            project: self,
            id: ROOT,
        }
    }

    /// Looks a class up by arena id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by another project.
    #[must_use]
    pub fn class(&self, id: ClassId) -> &TypeScriptClass {
        &self.classes[id.0]
    }

    /// Class an edge points to.
    #[must_use]
    pub fn dependency_target(&self, dependency: &Dependency) -> &TypeScriptClass {
        self.class(dependency.target())
    }

    /// Number of packages, root included.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// Read-only view onto one package of a [`TypeScriptProject`].
#[derive(Clone, Copy)]
pub struct TypeScriptPackage<'p> {
    project: &'p TypeScriptProject,
    id: PackageId,
}

impl fmt::Debug for TypeScriptPackage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeScriptPackage")
            .field("name", self.name())
            .field("path", self.path())
            .finish_non_exhaustive()
    }
}

impl<'p> TypeScriptPackage<'p> {
    fn node(self) -> &'p PackageNode {
        &self.project.packages[self.id.0]
    }

    fn view(self, id: PackageId) -> Self {
        Self {
            project: self.project,
            id,
        }
    }

    /// Folder name.
    #[must_use]
    pub fn name(self) -> &'p PackageName {
        &self.node().name
    }

    /// Folder path.
    #[must_use]
    pub fn path(self) -> &'p RelativePath {
        &self.node().path
    }

    /// Immediate child packages, in enumeration order.
    pub fn packages(self) -> impl Iterator<Item = TypeScriptPackage<'p>> {
        self.node().packages.iter().map(move |&id| self.view(id))
    }

    /// Classes declared directly in this package, in enumeration order.
    pub fn classes(self) -> impl Iterator<Item = &'p TypeScriptClass> {
        let project = self.project;
        self.node().classes.iter().map(move |id| project.class(*id))
    }

    /// Every class of this subtree: own classes first, then each child
    /// package's classes depth-first in child order.
    #[must_use]
    pub fn all_classes(self) -> Vec<&'p TypeScriptClass> {
        let mut result = Vec::new();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            let package = self.view(id);
            result.extend(package.classes());
            stack.extend(package.node().packages.iter().rev().copied());
        }
        result
    }

    /// Every edge of this subtree, in [`all_classes`](Self::all_classes)
    /// order. Duplicate edges are kept.
    #[must_use]
    pub fn all_dependencies(self) -> Vec<&'p Dependency> {
        self.all_classes()
            .into_iter()
            .flat_map(TypeScriptClass::dependencies)
            .collect()
    }

    /// Whether the immediate child package names are exactly `names`,
    /// ignoring order and duplicates.
    #[must_use]
    pub fn contains_exactly(self, names: &[&str]) -> bool {
        let expected: HashSet<&str> = names.iter().copied().collect();
        let actual: HashSet<&str> = self.packages().map(|p| p.name().as_str()).collect();
        actual == expected
    }

    /// Classes of this subtree whose package path contains `identifier`.
    #[must_use]
    pub fn filter_classes_by_package_identifier(self, identifier: &str) -> Vec<&'p TypeScriptClass> {
        self.all_classes()
            .into_iter()
            .filter(|c| c.package_path().contains(identifier))
            .collect()
    }

    /// Classes declared directly in the immediate child packages whose name
    /// contains `identifier`.
    ///
    /// Classes of this package itself and of deeper packages are not
    /// considered.
    #[must_use]
    pub fn filter_classes_by_class_name(self, identifier: &str) -> Vec<&'p TypeScriptClass> {
        self.packages()
            .flat_map(TypeScriptPackage::classes)
            .filter(|c| c.name().contains(identifier))
            .collect()
    }

    /// Immediate child package called `name`, if any.
    #[must_use]
    pub fn get_package(self, name: &str) -> Option<TypeScriptPackage<'p>> {
        self.packages().find(|p| p.name() == name)
    }

    /// Package paths of the `package-info` files in the immediate child
    /// packages that import `marker` (e.g. `SharedKernel`).
    #[must_use]
    pub fn shared_kernel_packages(self, marker: &str) -> Vec<&'p RelativePath> {
        self.filter_classes_by_class_name("package-info")
            .into_iter()
            .filter(|c| c.has_import(marker))
            .map(TypeScriptClass::package_path)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixture::{context_one, context_two, dir, fake_src, file};
    use super::*;

    fn names(classes: &[&TypeScriptClass]) -> Vec<String> {
        classes.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn package_takes_base_folder_name_and_path() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let root = project.root();
        assert_eq!(root.name(), "business-context-two");
        assert_eq!(root.path().as_str(), "/src/test/fake-src/business-context-two");
        let children: Vec<&str> = root.packages().map(|p| p.name().as_str()).collect();
        assert_eq!(children, vec!["domain", "infrastructure"]);
    }

    #[test]
    fn all_classes_lists_current_level_before_children() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        assert_eq!(
            names(&project.root().all_classes()),
            vec![
                "index.ts",
                "package-info.ts",
                "FruitApplicationService.ts",
                "Fruit.ts",
                "FruitName.ts",
                "package-info.ts",
                "Basket.ts",
                "BasketJson.ts",
                "package-info.ts",
                "Color.ts",
            ]
        );
    }

    #[test]
    fn all_classes_count_matches_own_plus_children() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let mut stack = vec![project.root()];
        while let Some(package) = stack.pop() {
            let expected = package.classes().count()
                + package
                    .packages()
                    .map(|child| child.all_classes().len())
                    .sum::<usize>();
            assert_eq!(package.all_classes().len(), expected, "{}", package.path());
            stack.extend(package.packages());
        }
    }

    #[test]
    fn only_resolved_imports_become_dependencies() {
        // Color.ts lives outside business-context-one.
        let project = TypeScriptProject::from_source(&context_one()).unwrap();
        let fruit = project
            .root()
            .all_classes()
            .into_iter()
            .find(|c| c.name() == "Fruit.ts")
            .unwrap();
        let targets: Vec<&str> = fruit.dependencies().iter().map(Dependency::name).collect();
        assert_eq!(targets, vec!["FruitName.ts"]);
    }

    #[test]
    fn cycles_produce_edges_in_both_directions() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let project = &project;
        let edges: Vec<(String, String)> = project
            .root()
            .all_classes()
            .into_iter()
            .flat_map(|c| {
                c.dependencies()
                    .iter()
                    .map(move |d| (c.name().to_string(), project.dependency_target(d).name().to_string()))
            })
            .collect();
        assert_eq!(
            edges,
            vec![
                ("Basket.ts".to_string(), "BasketJson.ts".to_string()),
                ("BasketJson.ts".to_string(), "Basket.ts".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_import_targets_collapse_within_a_file() {
        let tree = dir(
            "/src",
            vec![],
            vec![
                file("/src/A.ts", &["/src/B.ts", "/src/B.ts", "/src/C.ts"]),
                file("/src/B.ts", &[]),
                file("/src/C.ts", &[]),
            ],
        );
        let project = TypeScriptProject::from_source(&tree).unwrap();
        let a = project.root().classes().next().unwrap();
        let targets: Vec<&str> = a.dependencies().iter().map(Dependency::name).collect();
        assert_eq!(targets, vec!["B.ts", "C.ts"]);
    }

    #[test]
    fn all_dependencies_keeps_duplicate_edges_across_classes() {
        let tree = dir(
            "/src",
            vec![dir("/src/sub", vec![], vec![file("/src/sub/C.ts", &["/src/B.ts"])])],
            vec![file("/src/A.ts", &["/src/B.ts"]), file("/src/B.ts", &[])],
        );
        let project = TypeScriptProject::from_source(&tree).unwrap();
        let paths: Vec<&str> = project
            .root()
            .all_dependencies()
            .into_iter()
            .map(|d| d.path().as_str())
            .collect();
        assert_eq!(paths, vec!["/src/B.ts", "/src/B.ts"]);
    }

    #[test]
    fn contains_exactly_is_set_equality() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let root = project.root();
        assert!(root.contains_exactly(&[
            "shared-kernel",
            "business-context-one",
            "business-context-two",
        ]));
        assert!(root.contains_exactly(&[
            "business-context-two",
            "shared-kernel",
            "business-context-one",
            "shared-kernel",
        ]));
        assert!(!root.contains_exactly(&["business-context-one", "business-context-two"]));
        assert!(!root.contains_exactly(&[
            "business-context-one",
            "business-context-two",
            "shared-kernel",
            "other",
        ]));
    }

    #[test]
    fn filter_by_package_identifier_includes_current_level() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let found = project.root().filter_classes_by_package_identifier("fake-src");
        assert_eq!(found.len(), project.class_count());

        let domain = project.root().filter_classes_by_package_identifier("domain");
        assert_eq!(names(&domain), vec!["Fruit.ts", "FruitName.ts", "Basket.ts", "Color.ts"]);
    }

    #[test]
    fn filter_by_class_name_only_looks_at_immediate_children() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let root = project.root();

        // index.ts sits at the root level and is not considered.
        assert!(root.filter_classes_by_class_name("index").is_empty());
        // Fruit.ts sits two levels down and is not considered either.
        assert!(root.filter_classes_by_class_name("Fruit").is_empty());

        let infos = root.filter_classes_by_class_name("package-info");
        let paths: Vec<&str> = infos.iter().map(|c| c.path().as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/src/test/fake-src/business-context-one/package-info.ts",
                "/src/test/fake-src/business-context-two/package-info.ts",
                "/src/test/fake-src/shared-kernel/package-info.ts",
            ]
        );
    }

    #[test]
    fn get_package_returns_none_for_unknown_names() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let root = project.root();
        let kernel = root.get_package("shared-kernel").unwrap();
        assert_eq!(kernel.path().as_str(), "/src/test/fake-src/shared-kernel");
        assert!(root.get_package("domain").is_none());
    }

    #[test]
    fn shared_kernel_packages_follow_marker_imports() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let kernels = project.root().shared_kernel_packages("SharedKernel");
        let paths: Vec<&str> = kernels.iter().map(|p| p.as_str()).collect();
        assert_eq!(paths, vec!["/src/test/fake-src/shared-kernel"]);
    }

    #[test]
    fn empty_folder_name_is_rejected() {
        let tree = dir("/src/", vec![], vec![]);
        let err = TypeScriptProject::from_source(&tree).unwrap_err();
        assert!(matches!(err, ModelError::Directory { .. }));
        assert_eq!(err.to_string(), "invalid directory /src/");
        let cause = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("package name must not be empty"));
    }

    #[test]
    fn self_import_is_not_an_edge() {
        let tree = dir(
            "/src",
            vec![],
            vec![
                file("/src/A.ts", &["/src/A.ts", "/src/B.ts"]),
                file("/src/B.ts", &[]),
            ],
        );
        let project = TypeScriptProject::from_source(&tree).unwrap();
        let a = project.root().classes().next().unwrap();
        let targets: Vec<&str> = a.dependencies().iter().map(Dependency::name).collect();
        assert_eq!(targets, vec!["B.ts"]);
    }

    #[test]
    fn dependency_target_is_looked_up_by_id() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        for dependency in project.root().all_dependencies() {
            let target = project.dependency_target(dependency);
            assert_eq!(target.path(), dependency.path());
            assert!(dependency.target().index() < project.class_count());
        }
    }
}
