use async_trait::async_trait;

use crate::domain::{DomainError, Term};

/// Pulls public names out of a Python module.
#[async_trait]
pub trait TermExtractor: Send + Sync {
    /// Extract the public names a module defines or re-exports.
    ///
    /// `module_path` is the dotted module name and `library` the requirement
    /// the module belongs to; both are recorded on the returned terms.
    async fn extract_terms(
        &self,
        content: &str,
        module_path: &str,
        library: &str,
    ) -> Result<Vec<Term>, DomainError>;
}
