//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach arch-unit-ts how to pull import statements out of
//! a source file via Tree-sitter.

/// A single import (or re-export) statement extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
    /// Module specifier as written (e.g. `../infrastructure/BasketJson`).
    pub specifier: String,
    /// Local names bound by the statement (default, named, namespace).
    pub names: Vec<String>,
}

/// Result of analyzing a single source file with Tree-sitter.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Import statements, in source order.
    pub imports: Vec<ImportInfo>,
}

impl FileAnalysis {
    /// Every name bound by the file's import statements, in source order.
    #[must_use]
    pub fn imported_names(&self) -> Vec<String> {
        self.imports
            .iter()
            .flat_map(|i| i.names.iter().cloned())
            .collect()
    }
}

/// Error raised when a source file cannot be analyzed.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {source}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Tree-sitter error.
        source: tree_sitter::LanguageError,
    },
    /// The parser produced no tree.
    #[error("tree-sitter returned no tree for {language} source")]
    Parse {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific Tree-sitter extraction.
///
/// Implement this to add support for a new language.
/// The extractor receives raw source text and returns a [`FileAnalysis`]
/// containing the language-agnostic intermediate representation.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Extract import statements from source code.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the grammar cannot be loaded or parsing
    /// yields no tree.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;
}
