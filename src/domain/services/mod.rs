//! Pure helpers for package names and Python identifiers.

mod identifier;

pub use identifier::*;
