use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::future::{BoxFuture, FutureExt};
use tracing::{debug, error, warn};

use crate::domain::{DomainError, Requirement, RequirementLine};

/// Reads the libraries a project depends on from a `requirements.txt`.
pub struct ReadRequirementsUseCase;

#[derive(Default)]
struct ReadState {
    visited: HashSet<PathBuf>,
    seen_names: HashSet<String>,
    requirements: Vec<Requirement>,
}

impl ReadRequirementsUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Returns the requirements in file order, following `-r` includes.
    ///
    /// A missing requirements file is logged and yields an empty list.
    pub async fn execute(&self, path: &Path) -> Result<Vec<Requirement>, DomainError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            error!("{} not found", path.display());
            return Ok(Vec::new());
        }

        let mut state = ReadState::default();
        self.read_file(path.to_path_buf(), &mut state).await?;

        debug!(
            "Read {} requirements from {}",
            state.requirements.len(),
            path.display()
        );
        Ok(state.requirements)
    }

    fn read_file<'a>(
        &'a self,
        path: PathBuf,
        state: &'a mut ReadState,
    ) -> BoxFuture<'a, Result<(), DomainError>> {
        async move {
            let canonical = tokio::fs::canonicalize(&path).await?;
            if !state.visited.insert(canonical) {
                warn!("Skipping already included requirements file {}", path.display());
                return Ok(());
            }

            let content = tokio::fs::read_to_string(&path).await?;
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

            for (i, line) in content.lines().enumerate() {
                match RequirementLine::parse(line, i + 1) {
                    RequirementLine::Requirement(requirement) => {
                        if state.seen_names.insert(requirement.normalized_name()) {
                            state.requirements.push(requirement);
                        } else {
                            debug!("Duplicate requirement {} ignored", requirement.name());
                        }
                    }
                    RequirementLine::Include(target) => {
                        let include_path = base_dir.join(&target);
                        if !tokio::fs::try_exists(&include_path).await.unwrap_or(false) {
                            warn!(
                                "Included requirements file {} not found (line {} of {})",
                                include_path.display(),
                                i + 1,
                                path.display()
                            );
                            continue;
                        }
                        self.read_file(include_path, state).await?;
                    }
                    RequirementLine::Skip => {}
                }
            }

            Ok(())
        }
        .boxed()
    }
}

impl Default for ReadRequirementsUseCase {
    fn default() -> Self {
        Self::new()
    }
}
