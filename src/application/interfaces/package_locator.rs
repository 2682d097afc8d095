use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{DomainError, PackageSource, Requirement};

/// Finds the installed sources of a library.
#[async_trait]
pub trait PackageLocator: Send + Sync {
    /// Resolve a requirement to its installed package.
    ///
    /// Returns `Ok(None)` when the library is not installed in any search path.
    /// A library whose metadata is present but ships no Python sources resolves
    /// to a [`PackageSource`] without modules.
    async fn locate(&self, requirement: &Requirement) -> Result<Option<PackageSource>, DomainError>;

    /// Directories searched, in priority order.
    fn search_paths(&self) -> Vec<PathBuf>;
}
