use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::application::{DictionaryWriter, PackageLocator, TermExtractor};
use crate::domain::{DictionaryFormat, DictionaryOptions, DomainError};

use super::{GenerateDictionaryUseCase, LibrarySummary, WriteDictionaryUseCase};

pub const DEFAULT_REQUIREMENTS_PATH: &str = "requirements.txt";
pub const DEFAULT_OUTPUT_PATH: &str = ".vscode/dictionaries/data-science-en.txt";

#[derive(Debug, Clone, Serialize)]
pub struct DictionaryReport {
    pub output_path: PathBuf,
    pub format: DictionaryFormat,
    pub word_count: usize,
    pub libraries: Vec<LibrarySummary>,
}

impl DictionaryReport {
    pub fn skipped(&self) -> Vec<&str> {
        self.libraries
            .iter()
            .filter(|l| !l.located)
            .map(|l| l.name.as_str())
            .collect()
    }
}

/// Generates a dictionary from a requirements file and writes it out.
pub struct CreateDictionaryUseCase {
    generate: GenerateDictionaryUseCase,
    write: WriteDictionaryUseCase,
}

impl CreateDictionaryUseCase {
    pub fn new(
        locator: Arc<dyn PackageLocator>,
        extractor: Arc<dyn TermExtractor>,
        writer: Arc<dyn DictionaryWriter>,
    ) -> Self {
        Self {
            generate: GenerateDictionaryUseCase::new(locator, extractor),
            write: WriteDictionaryUseCase::new(writer),
        }
    }

    pub async fn execute(
        &self,
        requirements_path: &Path,
        output_path: &Path,
        options: &DictionaryOptions,
        format: Option<DictionaryFormat>,
    ) -> Result<DictionaryReport, DomainError> {
        let generated = self.generate.execute(requirements_path, options).await?;
        let format = self
            .write
            .execute(&generated.dictionary, output_path, format)
            .await?;

        Ok(DictionaryReport {
            output_path: output_path.to_path_buf(),
            format,
            word_count: generated.dictionary.len(),
            libraries: generated.libraries,
        })
    }
}
