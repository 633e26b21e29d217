//! Java engine backed by tree-sitter-java

use crate::error::{AstError, Result};
use crate::provider::SyntaxEngine;
use tracing::debug;

/// Tree-sitter parser configured with the Java grammar
///
/// Build one per thread and reuse it for every file; the grammar itself is
/// linked into the binary, so construction only validates ABI compatibility.
pub struct JavaEngine {
    parser: tree_sitter::Parser,
}

impl JavaEngine {
    /// Create a parser for Java
    pub fn new() -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&Self::language())
            .map_err(|e| AstError::TreeSitterError(e.to_string()))?;
        debug!("java grammar loaded");
        Ok(Self { parser })
    }

    /// The tree-sitter Java language
    pub fn language() -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }
}

impl SyntaxEngine for JavaEngine {
    type Tree = tree_sitter::Tree;

    fn grammar(&self) -> &str {
        "java"
    }

    fn parse(&mut self, source: &[u8]) -> Result<Self::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| AstError::parse_error("tree-sitter returned no tree"))
    }
}
