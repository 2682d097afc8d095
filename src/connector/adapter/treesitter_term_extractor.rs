use async_trait::async_trait;
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use crate::application::TermExtractor;
use crate::domain::{DomainError, Term, TermKind};

const PYTHON_NAME_QUERY: &str = r#"
(function_definition name: (identifier) @name) @function
(class_definition name: (identifier) @name) @class
(assignment left: (identifier) @name) @assignment
(assignment left: (pattern_list (identifier) @name)) @assignment
(assignment left: (tuple_pattern (identifier) @name)) @assignment
(import_from_statement
  module_name: (relative_import)
  name: (dotted_name (identifier) @name)) @import
(import_from_statement
  module_name: (relative_import)
  name: (aliased_import alias: (identifier) @name)) @import
"#;

/// Where a binding lives, which decides whether `dir()` on the module would see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Module,
    Class,
    Local,
}

/// Extracts public Python names with tree-sitter.
pub struct TreeSitterTermExtractor;

impl TreeSitterTermExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scope_of(node: Node) -> Scope {
        let mut scope = Scope::Module;
        let mut current = node.parent();

        while let Some(parent) = current {
            match parent.kind() {
                "function_definition" | "lambda" => return Scope::Local,
                "class_definition" => scope = Scope::Class,
                _ => {}
            }
            current = parent.parent();
        }

        scope
    }

    fn capture_to_term_kind(capture_name: &str, scope: Scope) -> Option<TermKind> {
        match (capture_name, scope) {
            (_, Scope::Local) => None,
            ("function", Scope::Module) => Some(TermKind::Function),
            ("function", Scope::Class) => Some(TermKind::Method),
            ("class", _) => Some(TermKind::Class),
            ("assignment", Scope::Module) => Some(TermKind::Constant),
            ("assignment", Scope::Class) => Some(TermKind::Attribute),
            ("import", Scope::Module) => Some(TermKind::Import),
            _ => None,
        }
    }
}

impl Default for TreeSitterTermExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TermExtractor for TreeSitterTermExtractor {
    async fn extract_terms(
        &self,
        content: &str,
        module_path: &str,
        library: &str,
    ) -> Result<Vec<Term>, DomainError> {
        let ts_language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();

        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| DomainError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| DomainError::parse(format!("Failed to parse {}", module_path)))?;

        if tree.root_node().has_error() {
            debug!("{} contains syntax errors; extracting what parsed", module_path);
        }

        let query = Query::new(&ts_language, PYTHON_NAME_QUERY)
            .map_err(|e| DomainError::parse(format!("Failed to create query: {}", e)))?;

        let mut cursor = QueryCursor::new();
        let capture_names: Vec<&str> = query.capture_names().to_vec();
        let mut matches_iter = cursor.matches(&query, tree.root_node(), content.as_bytes());

        let mut terms = Vec::new();

        while let Some(query_match) = matches_iter.next() {
            let mut name: Option<&str> = None;
            let mut main_node = None;
            let mut capture_kind = "";

            for capture in query_match.captures {
                let capture_name = capture_names
                    .get(capture.index as usize)
                    .copied()
                    .unwrap_or("");

                if capture_name == "name" {
                    name = Some(&content[capture.node.byte_range()]);
                } else {
                    main_node = Some(capture.node);
                    capture_kind = capture_name;
                }
            }

            let (Some(name), Some(node)) = (name, main_node) else {
                continue;
            };

            let Some(kind) = Self::capture_to_term_kind(capture_kind, Self::scope_of(node)) else {
                continue;
            };

            let term = Term::new(name, kind, library);
            if term.is_public() {
                terms.push(term);
            }
        }

        debug!("Extracted {} terms from {}", terms.len(), module_path);

        Ok(terms)
    }
}
