use std::path::PathBuf;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::Requirement;

use super::super::Container;

pub struct LibrariesController<'a> {
    container: &'a Container,
}

impl<'a> LibrariesController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self, requirements: PathBuf, format: OutputFormat) -> Result<String> {
        let use_case = self.container.read_requirements_use_case();
        let libraries = use_case.execute(&requirements).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&libraries)?,
            OutputFormat::Text => self.format_libraries(&libraries),
        })
    }

    fn format_libraries(&self, libraries: &[Requirement]) -> String {
        if libraries.is_empty() {
            return "No libraries found.".to_string();
        }

        let mut output = format!("Libraries ({}):\n\n", libraries.len());
        for library in libraries {
            output.push_str(&format!("  {}\n", library));
        }
        output.trim_end().to_string()
    }
}
