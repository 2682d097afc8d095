use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::application::DictionaryWriter;
use crate::domain::{DictionaryFormat, DomainError, SpellDictionary};

/// Writes dictionaries to the local file system.
pub struct FileDictionaryWriter;

impl FileDictionaryWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileDictionaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DictionaryWriter for FileDictionaryWriter {
    async fn write(
        &self,
        dictionary: &SpellDictionary,
        path: &Path,
        format: DictionaryFormat,
    ) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let rendered = dictionary.render(format)?;
        tokio::fs::write(path, rendered).await?;

        debug!("Wrote {} words to {} as {}", dictionary.len(), path.display(), format);
        Ok(())
    }
}
