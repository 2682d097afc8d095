pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    CreateDictionaryUseCase, DictionaryReport, DictionaryWriter, GenerateDictionaryUseCase,
    GeneratedDictionary, LibrarySummary, PackageLocator, ProcessLibraryUseCase,
    ReadRequirementsUseCase, TermExtractor, WriteDictionaryUseCase, DEFAULT_OUTPUT_PATH,
    DEFAULT_REQUIREMENTS_PATH,
};

pub use connector::{
    Container, ContainerConfig, FileDictionaryWriter, Router, SitePackagesLocator,
    TreeSitterTermExtractor,
};

pub use domain::{
    parse_requirements, parse_word_list, split_identifier, DictionaryFormat, DictionaryOptions,
    DomainError, ModuleFile, PackageSource, Requirement, RequirementLine, SpellDictionary, Term,
    TermKind,
};
