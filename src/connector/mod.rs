//! # Connector Layer
//!
//! External integrations implementing the application ports:
//! - Package discovery (site-packages directories and dist-info metadata)
//! - Parsing (Tree-sitter for Python sources)
//! - Dictionary output (text and cspell JSON files)
//! - The `api` surface shared by the command-line entry point

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
