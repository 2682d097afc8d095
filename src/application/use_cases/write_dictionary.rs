use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::application::DictionaryWriter;
use crate::domain::{DictionaryFormat, DomainError, SpellDictionary};

pub struct WriteDictionaryUseCase {
    writer: Arc<dyn DictionaryWriter>,
}

impl WriteDictionaryUseCase {
    pub fn new(writer: Arc<dyn DictionaryWriter>) -> Self {
        Self { writer }
    }

    /// Writes the dictionary; without an explicit format the output extension decides.
    pub async fn execute(
        &self,
        dictionary: &SpellDictionary,
        path: &Path,
        format: Option<DictionaryFormat>,
    ) -> Result<DictionaryFormat, DomainError> {
        let format = format.unwrap_or_else(|| DictionaryFormat::from_path(path));
        self.writer.write(dictionary, path, format).await?;

        info!(
            "Wrote {} words to {} ({})",
            dictionary.len(),
            path.display(),
            format
        );
        Ok(format)
    }
}
