mod decls;
mod types;

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};
use typemine_core::error::{Result, TypemineError};
use typemine_core::model::FileDeclarations;
use typemine_core::parser::DeclarationParser;

/// Declaration parser for Java sources, backed by tree-sitter-java.
#[derive(Clone)]
pub struct JavaParser {
    pub language: tree_sitter::Language,
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    pub fn parse_tree(&self, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| TypemineError::Parsing(e.to_string()))?;
        parser
            .parse(source, None)
            .ok_or_else(|| TypemineError::Parsing("Failed to parse Java file".to_string()))
    }
}

impl DeclarationParser for JavaParser {
    fn name(&self) -> &str {
        "java"
    }

    fn parse_declarations(&self, source: &str) -> Result<FileDeclarations> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();
        let decls = self.collect_declarations(root, source);

        if root.has_error() {
            if decls.types.is_empty() {
                return Err(TypemineError::Parsing(syntax_error_message(root)));
            }
            debug!("recovered {} type(s) from a file with syntax errors", decls.types.len());
        }
        Ok(decls)
    }
}

fn syntax_error_message(root: Node) -> String {
    match first_error(root) {
        Some(node) => {
            let at = node.start_position();
            format!("syntax error at {}:{}", at.row + 1, at.column + 1)
        }
        None => "syntax error".to_string(),
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.has_error())
        .find_map(first_error)
}

pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}
