use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::application::{PackageLocator, TermExtractor};
use crate::domain::{is_private_name, DomainError, ModuleFile, PackageSource, Requirement, Term, TermKind};

/// Maximum number of module files read and parsed concurrently.
const FILE_SCAN_CONCURRENCY: usize = 16;

/// Collects the terms one library contributes to the dictionary.
pub struct ProcessLibraryUseCase {
    locator: Arc<dyn PackageLocator>,
    extractor: Arc<dyn TermExtractor>,
}

impl ProcessLibraryUseCase {
    pub fn new(locator: Arc<dyn PackageLocator>, extractor: Arc<dyn TermExtractor>) -> Self {
        Self { locator, extractor }
    }

    /// Returns `None` when the library is not installed.
    ///
    /// Otherwise the library name comes first, followed by its public names
    /// sorted and without duplicates.
    pub async fn execute(&self, requirement: &Requirement) -> Result<Option<Vec<Term>>, DomainError> {
        let Some(package) = self.locator.locate(requirement).await? else {
            warn!("Unable to import {}. Skipping.", requirement.name());
            return Ok(None);
        };

        if !package.has_sources() {
            debug!(
                "{} has no Python sources under {}",
                requirement.name(),
                package.root().display()
            );
        }

        let library = requirement.name();
        let mut collected: BTreeMap<String, TermKind> = BTreeMap::new();
        let mut record = |term: Term| {
            if term.is_public() {
                collected
                    .entry(term.text)
                    .and_modify(|kind| *kind = (*kind).min(term.kind))
                    .or_insert(term.kind);
            }
        };

        for import_name in package.import_names() {
            record(Term::new(import_name.as_str(), TermKind::Module, library));
        }

        for module in package.modules() {
            if module.is_submodule() && !is_private_name(module.module_name()) {
                record(Term::new(module.module_name(), TermKind::Module, library));
            }
        }

        for term in self.scan_modules(&package, library).await {
            record(term);
        }

        let mut terms = vec![Term::new(library, TermKind::Library, library)];
        terms.extend(
            collected
                .into_iter()
                .filter(|(text, _)| text != library)
                .map(|(text, kind)| Term::new(text, kind, library)),
        );

        debug!("Collected {} terms from {}", terms.len(), library);
        Ok(Some(terms))
    }

    async fn scan_modules(&self, package: &PackageSource, library: &str) -> Vec<Term> {
        let extractor = self.extractor.clone();

        stream::iter(package.modules().iter().cloned())
            .map(|module: ModuleFile| {
                let extractor = extractor.clone();
                let library = library.to_string();
                async move {
                    let content = match tokio::fs::read_to_string(module.path()).await {
                        Ok(c) => c,
                        Err(e) => {
                            warn!("Failed to read {}: {}", module.path().display(), e);
                            return Vec::new();
                        }
                    };
                    match extractor
                        .extract_terms(&content, module.module_path(), &library)
                        .await
                    {
                        Ok(terms) => terms,
                        Err(e) => {
                            warn!("Failed to parse {}: {}", module.path().display(), e);
                            Vec::new()
                        }
                    }
                }
            })
            .buffer_unordered(FILE_SCAN_CONCURRENCY)
            .flat_map(stream::iter)
            .collect()
            .await
    }
}
