//! TypeScript language extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    TypeScript,
    Tsx,
}

/// Extracts import and re-export statements from TypeScript source.
pub struct TypeScriptExtractor {
    language: Language,
    dialect: Dialect,
}

impl TypeScriptExtractor {
    /// Extractor for `.ts` files.
    #[must_use]
    pub fn typescript() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            dialect: Dialect::TypeScript,
        }
    }

    /// Extractor for `.tsx` files.
    #[must_use]
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            dialect: Dialect::Tsx,
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// Module specifier of an import/export node, without quotes.
    fn specifier(node: &Node<'_>, src: &[u8]) -> Option<String> {
        let source = node.child_by_field_name("source")?;
        let raw = Self::text(&source, src);
        Some(raw.trim_matches(|c| c == '\'' || c == '"' || c == '`').to_owned())
    }

    /// Local names bound by an `import_clause`.
    fn bound_names(clause: &Node<'_>, src: &[u8], names: &mut Vec<String>) {
        let mut cursor = clause.walk();
        for child in clause.children(&mut cursor) {
            match child.kind() {
                "identifier" => names.push(Self::text(&child, src).to_owned()),
                "namespace_import" => {
                    let mut inner = child.walk();
                    for id in child.children(&mut inner) {
                        if id.kind() == "identifier" {
                            names.push(Self::text(&id, src).to_owned());
                        }
                    }
                }
                "named_imports" => {
                    let mut inner = child.walk();
                    for spec in child.children(&mut inner) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let bound = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(bound) = bound {
                            names.push(Self::text(&bound, src).to_owned());
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn extract_import(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
        let specifier = Self::specifier(node, src)?;
        let mut names = Vec::new();
        if node.kind() == "import_statement" {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "import_clause" {
                    Self::bound_names(&child, src, &mut names);
                }
            }
        }
        Some(ImportInfo {
            line: node.start_position().row + 1,
            column: node.start_position().column,
            specifier,
            names,
        })
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::typescript()
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        match self.dialect {
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self.dialect {
            Dialect::TypeScript => &["ts"],
            Dialect::Tsx => &["tsx"],
        }
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let language = self.language_id();
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|source| ExtractError::Language { language, source })?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or(ExtractError::Parse { language })?;
        let root = tree.root_node();

        let mut result = FileAnalysis::default();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            // `export { X } from './x'` creates an edge too; plain exports
            // have no `source` field and are skipped.
            if matches!(node.kind(), "import_statement" | "export_statement") {
                if let Some(import) = Self::extract_import(&node, src) {
                    result.imports.push(import);
                }
            }
        }

        Ok(result)
    }
}
