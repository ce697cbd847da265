//! Source-tree collaborator traits.
//!
//! A project graph is built from a snapshot of the source tree handed over
//! by a language front-end (see `arch-unit-ts`). These traits describe the
//! minimum that front-end has to expose; parsing and import resolution
//! happen on its side.

/// A folder of the source tree.
pub trait SourceDirectory: Sized {
    /// File type held by this directory.
    type File: SourceFile;

    /// Base folder name (e.g. `domain`).
    fn base_name(&self) -> &str;

    /// Path of the folder relative to the project base.
    fn path(&self) -> &str;

    /// Child folders, in enumeration order.
    fn directories(&self) -> &[Self];

    /// Source files directly inside this folder, in enumeration order.
    fn source_files(&self) -> &[Self::File];
}

/// A single source file of the source tree.
pub trait SourceFile {
    /// File identifier (e.g. `Basket.ts`).
    fn name(&self) -> &str;

    /// Path of the file relative to the project base.
    fn path(&self) -> &str;

    /// Candidate target paths, one per import statement, in statement order.
    ///
    /// Targets that do not name a file of the same tree are ignored when
    /// the graph is built.
    fn import_targets(&self) -> &[String];

    /// Identifiers bound by the file's import statements.
    fn imported_names(&self) -> &[String] {
        &[]
    }
}
