//! # arch-unit-ts
//!
//! Tree-sitter based TypeScript front-end for arch-unit.
//!
//! This crate turns a TypeScript source tree on disk into an
//! `arch-unit-core` [`TypeScriptProject`](arch_unit_core::TypeScriptProject)
//! and adds:
//!
//! - [`LanguageExtractor`] trait for pluggable import extraction
//! - [`TypeScriptExtractor`] for `.ts` / `.tsx` files
//! - [`SpecifierResolver`] for relative and aliased module specifiers
//! - [`ProjectLoader`] for walking, parsing and resolving a tree
//! - [`ArchConfig`] for TOML-based rule definitions

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod extractor;
pub mod loader;
pub mod resolve;
pub mod typescript;

pub use config::{ArchConfig, ConfigError, ConfiguredRule, RuleDef};
pub use extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor};
pub use loader::{LoadError, ProjectLoader, ScannedDirectory, ScannedFile};
pub use resolve::SpecifierResolver;
pub use typescript::TypeScriptExtractor;
