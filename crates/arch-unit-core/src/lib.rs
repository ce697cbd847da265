//! # arch-unit-core
//!
//! Dependency graph model and rule engine for architecture conformance
//! checks.
//!
//! This crate provides:
//!
//! - [`TypeScriptProject`] / [`TypeScriptPackage`]: the package tree and its
//!   classes, built once from a [`SourceDirectory`] snapshot
//! - [`DescribedPredicate`] for selecting classes and dependency targets
//! - [`ArchCondition`] implementations recording [`ConditionEvents`]
//! - [`classes()`] for defining and checking [`ArchRule`]s fluently
//!
//! ## Example
//!
//! ```ignore
//! use arch_unit_core::{classes, TypeScriptProject};
//!
//! let project = TypeScriptProject::from_source(&snapshot)?;
//!
//! classes()
//!     .that()
//!     .reside_in_a_package("domain")
//!     .should()
//!     .only_depend_on_classes_that()
//!     .reside_in_any_package(&["domain", "shared-kernel"])
//!     .because("Domain model should only depend on domains")
//!     .check(project.root().all_classes())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod class;
mod project;
mod source;
mod types;

pub mod fluentapi;

pub use class::{ClassId, Dependency, TypeScriptClass};
pub use fluentapi::{
    classes, AllDependencyCondition, ArchCondition, ArchConditionBox, ArchRule, ArchRuleError,
    ConditionEvent, ConditionEvents, DescribedPredicate, NeverCondition,
};
pub use project::{TypeScriptPackage, TypeScriptProject};
pub use source::{SourceDirectory, SourceFile};
pub use types::{ModelError, PackageName, RelativePath};
