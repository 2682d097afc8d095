use std::path::Path;

use async_trait::async_trait;

use crate::domain::{DictionaryFormat, DomainError, SpellDictionary};

#[async_trait]
pub trait DictionaryWriter: Send + Sync {
    /// Write the dictionary's words, in order, creating parent directories.
    async fn write(
        &self,
        dictionary: &SpellDictionary,
        path: &Path,
        format: DictionaryFormat,
    ) -> Result<(), DomainError>;
}
