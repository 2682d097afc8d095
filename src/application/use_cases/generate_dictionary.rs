use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::application::{PackageLocator, TermExtractor};
use crate::domain::{DictionaryOptions, DomainError, Requirement, SpellDictionary, Term};

use super::{ProcessLibraryUseCase, ReadRequirementsUseCase};

/// Outcome for a single requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySummary {
    pub name: String,
    pub located: bool,
    pub term_count: usize,
}

#[derive(Debug, Clone)]
pub struct GeneratedDictionary {
    pub dictionary: SpellDictionary,
    /// Every term collected, in library order, before dictionary options apply.
    pub terms: Vec<Term>,
    pub libraries: Vec<LibrarySummary>,
}

impl GeneratedDictionary {
    pub fn skipped(&self) -> Vec<&str> {
        self.libraries
            .iter()
            .filter(|l| !l.located)
            .map(|l| l.name.as_str())
            .collect()
    }
}

/// Builds a dictionary from every library listed in a requirements file.
pub struct GenerateDictionaryUseCase {
    read_requirements: ReadRequirementsUseCase,
    process_library: ProcessLibraryUseCase,
}

impl GenerateDictionaryUseCase {
    pub fn new(locator: Arc<dyn PackageLocator>, extractor: Arc<dyn TermExtractor>) -> Self {
        Self {
            read_requirements: ReadRequirementsUseCase::new(),
            process_library: ProcessLibraryUseCase::new(locator, extractor),
        }
    }

    pub async fn execute(
        &self,
        requirements_path: &Path,
        options: &DictionaryOptions,
    ) -> Result<GeneratedDictionary, DomainError> {
        let requirements = self.read_requirements.execute(requirements_path).await?;
        self.execute_for(&requirements, options).await
    }

    pub async fn execute_for(
        &self,
        requirements: &[Requirement],
        options: &DictionaryOptions,
    ) -> Result<GeneratedDictionary, DomainError> {
        let start_time = Instant::now();
        info!("Processing {} libraries", requirements.len());

        let progress_bar = ProgressBar::new(requirements.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            progress_bar.set_style(style.progress_chars("#>-"));
        }

        let mut terms = Vec::new();
        let mut libraries = Vec::with_capacity(requirements.len());

        for requirement in requirements {
            progress_bar.set_message(requirement.name().to_string());

            let library_terms = self.process_library.execute(requirement).await?;
            libraries.push(LibrarySummary {
                name: requirement.name().to_string(),
                located: library_terms.is_some(),
                term_count: library_terms.as_ref().map_or(0, Vec::len),
            });
            terms.extend(library_terms.unwrap_or_default());

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let dictionary = SpellDictionary::from_terms(&terms, options);

        info!(
            "Generated {} words from {} terms in {:.2}s",
            dictionary.len(),
            terms.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(GeneratedDictionary {
            dictionary,
            terms,
            libraries,
        })
    }
}
