use anyhow::Result;

use crate::cli::OutputFormat;
use crate::{DomainError, Requirement, Term};

use super::super::Container;

pub struct InspectController<'a> {
    container: &'a Container,
}

impl<'a> InspectController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn inspect(&self, library: String, format: OutputFormat) -> Result<String> {
        let requirement = Requirement::new(library);
        let use_case = self.container.process_library_use_case();

        let Some(terms) = use_case.execute(&requirement).await? else {
            let searched: Vec<String> = self
                .container
                .search_paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            return Err(DomainError::not_found(format!(
                "package '{}'. Searched: {}",
                requirement.name(),
                if searched.is_empty() {
                    "(no search paths)".to_string()
                } else {
                    searched.join(", ")
                }
            ))
            .into());
        };

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&terms)?,
            OutputFormat::Text => self.format_terms(&terms),
        })
    }

    fn format_terms(&self, terms: &[Term]) -> String {
        let mut output = String::new();
        for term in terms {
            output.push_str(&format!("{:<10} {}\n", term.kind().as_str(), term.text()));
        }
        output.push_str(&format!("\n{} terms", terms.len()));
        output
    }
}
