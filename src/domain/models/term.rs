use serde::{Deserialize, Serialize};

use crate::domain::is_private_name;

/// A word harvested from a library, together with what kind of name it was.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    pub kind: TermKind,
    pub library: String,
}

impl Term {
    pub fn new(text: impl Into<String>, kind: TermKind, library: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            library: library.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TermKind {
        self.kind
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn is_public(&self) -> bool {
        !is_private_name(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    Library,
    Module,
    Class,
    Function,
    Method,
    Constant,
    Attribute,
    Import,
}

impl TermKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermKind::Library => "library",
            TermKind::Module => "module",
            TermKind::Class => "class",
            TermKind::Function => "function",
            TermKind::Method => "method",
            TermKind::Constant => "constant",
            TermKind::Attribute => "attribute",
            TermKind::Import => "import",
        }
    }
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
