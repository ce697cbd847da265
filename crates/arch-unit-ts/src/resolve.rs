//! Module specifier resolution.
//!
//! Maps the specifier of an import statement to the project-relative path
//! of the file it names. Relative specifiers (`./`, `../`) resolve against
//! the importing file's folder; aliased specifiers (e.g. `@/`) are
//! rewritten with the configured prefix. Bare package names are external
//! and never resolve.

use std::collections::HashSet;

use arch_unit_core::RelativePath;

/// Suffixes tried, in order, when a specifier omits the file extension.
const CANDIDATE_SUFFIXES: &[&str] = &["", ".ts", ".tsx", "/index.ts", "/index.tsx"];

/// Resolves specifiers to project-relative file paths.
#[derive(Debug, Clone, Default)]
pub struct SpecifierResolver {
    /// (specifier prefix, replacement path) sorted by prefix length descending.
    aliases: Vec<(String, String)>,
}

impl SpecifierResolver {
    /// Creates a resolver from `(prefix, target)` alias pairs. Targets are
    /// paths relative to the project base.
    #[must_use]
    pub fn new<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut aliases: Vec<(String, String)> = aliases
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        // Longest prefix first for correct matching
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { aliases }
    }

    /// Resolves `specifier`, written in the file at `from`.
    ///
    /// Returns the first candidate path present in `known`; when none is,
    /// the bare candidate (the file may live outside the loaded tree).
    /// Returns `None` for external package specifiers and for relative
    /// specifiers climbing above the base.
    #[must_use]
    pub fn resolve(
        &self,
        from: &RelativePath,
        specifier: &str,
        known: &HashSet<RelativePath>,
    ) -> Option<RelativePath> {
        let unresolved = self.unaliased(from, specifier)?;
        let candidate = CANDIDATE_SUFFIXES
            .iter()
            .map(|suffix| RelativePath::of(&format!("{unresolved}{suffix}")))
            .find(|c| known.contains(c));
        Some(candidate.unwrap_or_else(|| RelativePath::of(&unresolved)))
    }

    fn unaliased(&self, from: &RelativePath, specifier: &str) -> Option<String> {
        if specifier.starts_with("./") || specifier.starts_with("../") {
            return normalize(&format!("{}/{specifier}", from.parent()));
        }
        self.aliases.iter().find_map(|(prefix, target)| {
            specifier
                .strip_prefix(prefix.as_str())
                .and_then(|rest| normalize(&format!("{target}/{rest}")))
        })
    }
}

/// Collapses `.` and `..` segments; `None` if the path climbs above `/`.
fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(format!("/{}", segments.join("/")))
}
