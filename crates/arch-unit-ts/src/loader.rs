//! Loads a TypeScript source tree from disk into a [`TypeScriptProject`].
//!
//! Folders are walked in file-name order. Every file with a supported
//! extension is parsed once; its import specifiers are resolved after the
//! walk, when the full set of project files is known.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use arch_unit_core::{ModelError, RelativePath, SourceDirectory, SourceFile, TypeScriptProject};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::extractor::{ExtractError, ImportInfo, LanguageExtractor};
use crate::resolve::SpecifierResolver;
use crate::typescript::TypeScriptExtractor;

/// Errors from loading a project.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The project root does not exist or is not a folder.
    #[error("project root {0} is not a directory")]
    MissingRoot(PathBuf),

    /// Walking the tree failed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading a source file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// Tree-sitter could not analyze a file.
    #[error("failed to analyze {path}: {source}")]
    Extract {
        /// File that failed.
        path: PathBuf,
        /// Extraction error.
        source: ExtractError,
    },

    /// Invalid exclude pattern.
    #[error("invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// The snapshot broke a graph invariant.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A folder of the scanned tree.
#[derive(Debug, Clone)]
pub struct ScannedDirectory {
    name: String,
    path: String,
    directories: Vec<ScannedDirectory>,
    files: Vec<ScannedFile>,
}

/// A parsed source file of the scanned tree.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    name: String,
    path: RelativePath,
    imports: Vec<ImportInfo>,
    targets: Vec<String>,
    names: Vec<String>,
}

impl ScannedFile {
    /// Import statements found in the file.
    #[must_use]
    pub fn imports(&self) -> &[ImportInfo] {
        &self.imports
    }
}

impl SourceDirectory for ScannedDirectory {
    type File = ScannedFile;

    fn base_name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn directories(&self) -> &[Self] {
        &self.directories
    }

    fn source_files(&self) -> &[ScannedFile] {
        &self.files
    }
}

impl SourceFile for ScannedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        self.path.as_str()
    }

    fn import_targets(&self) -> &[String] {
        &self.targets
    }

    fn imported_names(&self) -> &[String] {
        &self.names
    }
}

/// Builder-style loader for TypeScript projects.
pub struct ProjectLoader {
    base: PathBuf,
    exclude: Vec<glob::Pattern>,
    resolver: SpecifierResolver,
    extractors: Vec<Box<dyn LanguageExtractor>>,
}

impl ProjectLoader {
    /// Creates a loader reporting paths relative to `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            exclude: Vec::new(),
            resolver: SpecifierResolver::default(),
            extractors: vec![
                Box::new(TypeScriptExtractor::typescript()),
                Box::new(TypeScriptExtractor::tsx()),
            ],
        }
    }

    /// Adds an exclude glob, matched against paths relative to the loaded root.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Glob`] if the pattern is invalid.
    pub fn exclude(mut self, pattern: &str) -> Result<Self, LoadError> {
        self.exclude.push(glob::Pattern::new(pattern)?);
        Ok(self)
    }

    /// Sets the specifier resolver (aliases).
    #[must_use]
    pub fn resolver(mut self, resolver: SpecifierResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Restricts parsing to files with the given extensions.
    #[must_use]
    pub fn extensions(mut self, extensions: &[String]) -> Self {
        self.extractors
            .retain(|e| e.extensions().iter().any(|x| extensions.iter().any(|y| y == x)));
        self
    }

    /// Scans `root` (relative to the base) and builds the project graph.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the tree cannot be walked, a file cannot be
    /// read or parsed, or a folder name is invalid.
    pub fn load(&self, root: impl AsRef<Path>) -> Result<TypeScriptProject, LoadError> {
        let tree = self.scan(root.as_ref())?;
        Ok(TypeScriptProject::from_source(&tree)?)
    }

    /// Scans `root` (relative to the base) into a resolved snapshot.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn scan(&self, root: &Path) -> Result<ScannedDirectory, LoadError> {
        let root_abs = self.base.join(root);
        if !root_abs.is_dir() {
            return Err(LoadError::MissingRoot(root_abs));
        }

        // `.`-only roots have no last segment; name them after the real folder.
        let root_name = root_abs
            .canonicalize()
            .map(|p| file_name(&p))
            .map_err(|e| LoadError::Io {
                path: root_abs.clone(),
                source: e,
            })?;

        let mut known: HashSet<RelativePath> = HashSet::new();
        let mut stack: Vec<ScannedDirectory> = Vec::new();

        let walker = WalkDir::new(&root_abs)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(&root_abs, e.path()));

        for entry in walker {
            let entry = entry?;
            let depth = entry.depth();
            while stack.len() > depth {
                close_directory(&mut stack);
            }

            if entry.file_type().is_dir() {
                let name = if depth == 0 {
                    root_name.clone()
                } else {
                    file_name(entry.path())
                };
                stack.push(ScannedDirectory {
                    name,
                    path: self.relative(entry.path()).as_str().to_string(),
                    directories: Vec::new(),
                    files: Vec::new(),
                });
                continue;
            }

            let Some(extractor) = self.extractor_for(entry.path()) else {
                continue;
            };
            let Some(parent) = stack.last_mut() else {
                continue;
            };
            let file = self.parse(entry.path(), extractor)?;
            known.insert(file.path.clone());
            parent.files.push(file);
        }

        while stack.len() > 1 {
            close_directory(&mut stack);
        }
        let mut tree = stack.pop().ok_or(LoadError::MissingRoot(root_abs))?;

        self.resolve_all(&mut tree, &known);
        debug!(root = %tree.path, files = known.len(), "scanned source tree");
        Ok(tree)
    }

    fn parse(
        &self,
        path: &Path,
        extractor: &dyn LanguageExtractor,
    ) -> Result<ScannedFile, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let analysis = extractor
            .analyze(&source)
            .map_err(|e| LoadError::Extract {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(ScannedFile {
            name: file_name(path),
            path: self.relative(path),
            names: analysis.imported_names(),
            imports: analysis.imports,
            targets: Vec::new(),
        })
    }

    fn resolve_all(&self, tree: &mut ScannedDirectory, known: &HashSet<RelativePath>) {
        let mut stack = vec![tree];
        while let Some(dir) = stack.pop() {
            for file in &mut dir.files {
                file.targets = file
                    .imports
                    .iter()
                    .filter_map(|import| {
                        let resolved = self.resolver.resolve(&file.path, &import.specifier, known);
                        if resolved.is_none() {
                            trace!(file = %file.path, specifier = %import.specifier, "external import");
                        }
                        resolved
                    })
                    .map(|p| p.as_str().to_string())
                    .collect();
            }
            stack.extend(dir.directories.iter_mut());
        }
    }

    fn extractor_for(&self, path: &Path) -> Option<&dyn LanguageExtractor> {
        let ext = path.extension()?.to_str()?;
        if path.to_string_lossy().ends_with(".d.ts") {
            return None;
        }
        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&ext))
            .map(|e| &**e)
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(root) else {
            return false;
        };
        if rel.as_os_str().is_empty() {
            return false;
        }
        self.exclude.iter().any(|p| p.matches_path(rel))
    }

    fn relative(&self, path: &Path) -> RelativePath {
        let rel = path.strip_prefix(&self.base).unwrap_or(path);
        RelativePath::of(&rel.to_string_lossy())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn close_directory(stack: &mut Vec<ScannedDirectory>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.directories.push(done);
        }
    }
}
