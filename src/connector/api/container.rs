use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::{
    CreateDictionaryUseCase, DictionaryWriter, GenerateDictionaryUseCase, PackageLocator,
    ProcessLibraryUseCase, ReadRequirementsUseCase, TermExtractor,
};
use crate::connector::adapter::{FileDictionaryWriter, SitePackagesLocator, TreeSitterTermExtractor};

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// Site-packages directories given explicitly, searched first.
    pub site_packages: Vec<PathBuf>,
    /// Only search `site_packages`; skip `VIRTUAL_ENV`, `CONDA_PREFIX` and `PYTHONPATH`.
    pub isolated: bool,
    pub max_depth: Option<usize>,
}

pub struct Container {
    locator: Arc<dyn PackageLocator>,
    extractor: Arc<dyn TermExtractor>,
    writer: Arc<dyn DictionaryWriter>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let search_paths = if config.isolated {
            config.site_packages.clone()
        } else {
            SitePackagesLocator::discover_search_paths(&config.site_packages)
        };

        let locator = SitePackagesLocator::new(search_paths).with_max_depth(config.max_depth);
        if locator.search_paths().is_empty() {
            warn!(
                "No site-packages directories to search; pass --site-packages or activate a virtual environment"
            );
        }
        for path in locator.search_paths() {
            debug!("Searching {}", path.display());
        }

        Ok(Self {
            locator: Arc::new(locator),
            extractor: Arc::new(TreeSitterTermExtractor::new()),
            writer: Arc::new(FileDictionaryWriter::new()),
        })
    }

    pub fn read_requirements_use_case(&self) -> ReadRequirementsUseCase {
        ReadRequirementsUseCase::new()
    }

    pub fn process_library_use_case(&self) -> ProcessLibraryUseCase {
        ProcessLibraryUseCase::new(self.locator.clone(), self.extractor.clone())
    }

    pub fn generate_use_case(&self) -> GenerateDictionaryUseCase {
        GenerateDictionaryUseCase::new(self.locator.clone(), self.extractor.clone())
    }

    pub fn create_use_case(&self) -> CreateDictionaryUseCase {
        CreateDictionaryUseCase::new(
            self.locator.clone(),
            self.extractor.clone(),
            self.writer.clone(),
        )
    }

    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.locator.search_paths()
    }
}
