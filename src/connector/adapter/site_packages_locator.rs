use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::application::PackageLocator;
use crate::domain::{
    is_private_name, normalize_package_name, DomainError, ModuleFile, PackageSource, Requirement,
};

/// Directories inside a package that never hold public API.
const EXCLUDED_DIRS: &[&str] = &["tests", "test", "testing"];
const EXCLUDED_FILES: &[&str] = &["conftest.py", "setup.py"];
const SOURCE_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Locates installed packages by reading site-packages directories.
///
/// Nothing is imported: `*.dist-info`/`*.egg-info` metadata maps a distribution
/// name to its import names, and the package's `.py`/`.pyi` files are collected
/// for term extraction.
pub struct SitePackagesLocator {
    search_paths: Vec<PathBuf>,
    max_depth: Option<usize>,
}

impl SitePackagesLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        let search_paths = search_paths
            .into_iter()
            .filter(|path| {
                let exists = path.is_dir();
                if !exists {
                    warn!("Ignoring missing search path {}", path.display());
                }
                exists
            })
            .collect();

        Self {
            search_paths,
            max_depth: None,
        }
    }

    /// Limit how deep package directories are walked (`1` = top-level files only).
    /// `0` is treated as `1` so a package's own files are always seen.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth.map(|depth| depth.max(1));
        self
    }

    /// Explicit directories first, then the active virtualenv/conda
    /// environment, then `PYTHONPATH`.
    pub fn discover_search_paths(explicit: &[PathBuf]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = explicit.to_vec();

        for var in ["VIRTUAL_ENV", "CONDA_PREFIX"] {
            if let Some(prefix) = std::env::var_os(var) {
                paths.extend(site_packages_under(Path::new(&prefix)));
            }
        }

        if let Some(python_path) = std::env::var_os("PYTHONPATH") {
            paths.extend(std::env::split_paths(&python_path));
        }

        let mut unique = Vec::with_capacity(paths.len());
        for path in paths {
            if !path.as_os_str().is_empty() && !unique.contains(&path) {
                unique.push(path);
            }
        }
        unique
    }

    fn locate_blocking(
        search_paths: &[PathBuf],
        requirement: &Requirement,
        max_depth: Option<usize>,
    ) -> Option<PackageSource> {
        let normalized = requirement.normalized_name();

        for root in search_paths {
            let metadata_dir = find_metadata_dir(root, &normalized);
            let import_names = metadata_dir
                .as_deref()
                .map(read_top_level)
                .filter(|names| !names.is_empty())
                .unwrap_or_else(|| requirement.import_candidates());

            let mut resolved = Vec::new();
            let mut modules = Vec::new();
            for import_name in &import_names {
                if let Some(found) = collect_modules(root, import_name, max_depth) {
                    resolved.push(import_name.clone());
                    modules.extend(found);
                }
            }

            if metadata_dir.is_none() && resolved.is_empty() {
                continue;
            }

            debug!(
                "Located {} in {} ({} modules)",
                requirement.name(),
                root.display(),
                modules.len()
            );

            let import_names = if resolved.is_empty() {
                import_names
            } else {
                resolved
            };
            return Some(
                PackageSource::new(requirement.name(), root.clone())
                    .with_import_names(import_names)
                    .with_modules(modules),
            );
        }

        None
    }
}

#[async_trait]
impl PackageLocator for SitePackagesLocator {
    async fn locate(&self, requirement: &Requirement) -> Result<Option<PackageSource>, DomainError> {
        let search_paths = self.search_paths.clone();
        let requirement = requirement.clone();
        let max_depth = self.max_depth;

        tokio::task::spawn_blocking(move || {
            Self::locate_blocking(&search_paths, &requirement, max_depth)
        })
        .await
        .map_err(|e| DomainError::internal(format!("Package lookup task failed: {}", e)))
    }

    fn search_paths(&self) -> Vec<PathBuf> {
        self.search_paths.clone()
    }
}

/// `lib/python3.*/site-packages` (POSIX) and `Lib/site-packages` (Windows) under a prefix.
fn site_packages_under(prefix: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    if let Ok(entries) = fs::read_dir(prefix.join("lib")) {
        let mut versions: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
            .map(|entry| entry.path().join("site-packages"))
            .filter(|path| path.is_dir())
            .collect();
        versions.sort();
        found.extend(versions);
    }

    let windows = prefix.join("Lib").join("site-packages");
    if windows.is_dir() && !found.contains(&windows) {
        found.push(windows);
    }

    found
}

/// Finds `<name>-<version>.dist-info` or `<name>[-<version>...].egg-info` for a
/// normalized distribution name.
fn find_metadata_dir(root: &Path, normalized: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(root).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(stem) = file_name
                .strip_suffix(".dist-info")
                .or_else(|| file_name.strip_suffix(".egg-info"))
            else {
                return false;
            };
            let dist_name = stem.split_once('-').map_or(stem, |(name, _)| name);
            normalize_package_name(dist_name) == normalized
        })
        .map(|entry| entry.path())
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}

fn read_top_level(metadata_dir: &Path) -> Vec<String> {
    fs::read_to_string(metadata_dir.join("top_level.txt"))
        .map(|content| {
            content
                .lines()
                .map(str::trim)
                .filter(|name| !name.is_empty() && !is_private_name(name))
                .map(|name| name.replace('/', "."))
                .collect()
        })
        .unwrap_or_default()
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn collect_modules(root: &Path, import_name: &str, max_depth: Option<usize>) -> Option<Vec<ModuleFile>> {
    let relative: PathBuf = import_name.split('.').collect();
    let package_dir = root.join(&relative);

    if package_dir.is_dir() {
        let modules = walk_package(root, &package_dir, max_depth);
        return if modules.is_empty() { None } else { Some(modules) };
    }

    SOURCE_EXTENSIONS.iter().find_map(|ext| {
        let file = root.join(&relative).with_extension(ext);
        file.is_file()
            .then(|| vec![ModuleFile::new(file, import_name)])
    })
}

fn walk_package(root: &Path, package_dir: &Path, max_depth: Option<usize>) -> Vec<ModuleFile> {
    let mut modules: Vec<ModuleFile> = WalkBuilder::new(package_dir)
        .hidden(true)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .max_depth(max_depth)
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !is_private_name(&name) && !EXCLUDED_DIRS.contains(&&*name)
        })
        .build()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Error walking {}: {}", package_dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| is_source_file(entry.path()))
        .filter_map(|entry| {
            let file_name = entry.file_name().to_string_lossy();
            let stem = Path::new(&*file_name).file_stem()?.to_string_lossy();
            if EXCLUDED_FILES.contains(&&*file_name)
                || (is_private_name(&stem) && stem != "__init__")
            {
                return None;
            }
            let module_path = module_path_for(root, entry.path())?;
            Some(ModuleFile::new(entry.path(), module_path))
        })
        .collect();

    modules.sort_by(|a, b| a.path().cmp(b.path()));
    modules
}

/// `root/pkg/sub/__init__.py` -> `pkg.sub`, `root/pkg/sub/mod.py` -> `pkg.sub.mod`.
fn module_path_for(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let mut parts: Vec<String> = relative
        .parent()?
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let stem = relative.file_stem()?.to_string_lossy();
    if stem != "__init__" {
        parts.push(stem.into_owned());
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}
