use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A Python source file belonging to an installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    pub path: PathBuf,
    /// Dotted module name, e.g. `pandas.io.parsers`.
    pub module_path: String,
}

impl ModuleFile {
    pub fn new(path: impl Into<PathBuf>, module_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module_path: module_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// The name the module is bound to in its parent package.
    pub fn module_name(&self) -> &str {
        self.module_path
            .rsplit('.')
            .next()
            .unwrap_or(&self.module_path)
    }

    /// True for submodules; top-level modules are named after the package itself.
    pub fn is_submodule(&self) -> bool {
        self.module_path.contains('.')
    }
}

/// Where an installed library lives and which of its files carry terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSource {
    library: String,
    import_names: Vec<String>,
    root: PathBuf,
    modules: Vec<ModuleFile>,
}

impl PackageSource {
    pub fn new(library: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            library: library.into(),
            import_names: Vec::new(),
            root: root.into(),
            modules: Vec::new(),
        }
    }

    pub fn with_import_names(mut self, import_names: Vec<String>) -> Self {
        self.import_names = import_names;
        self
    }

    pub fn with_modules(mut self, modules: Vec<ModuleFile>) -> Self {
        self.modules = modules;
        self
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn import_names(&self) -> &[String] {
        &self.import_names
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn modules(&self) -> &[ModuleFile] {
        &self.modules
    }

    pub fn has_sources(&self) -> bool {
        !self.modules.is_empty()
    }
}
