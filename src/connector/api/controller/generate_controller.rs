use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::{parse_word_list, DictionaryFormat, DictionaryOptions};

use super::super::Container;

/// Flags of the `generate` command, gathered for the controller.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub requirements: PathBuf,
    pub output: PathBuf,
    pub format: Option<DictionaryFormat>,
    pub split: bool,
    pub dedupe: bool,
    pub min_length: usize,
    pub exclude: Vec<PathBuf>,
    pub dry_run: bool,
}

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let options = self.build_options(&request).await?;

        if request.dry_run {
            let generated = self
                .container
                .generate_use_case()
                .execute(&request.requirements, &options)
                .await?;
            let format = request
                .format
                .unwrap_or_else(|| DictionaryFormat::from_path(&request.output));
            let rendered = generated.dictionary.render(format)?;
            return Ok(rendered.trim_end().to_string());
        }

        let report = self
            .container
            .create_use_case()
            .execute(
                &request.requirements,
                &request.output,
                &options,
                request.format,
            )
            .await?;

        let mut output = format!(
            "Wrote {} words from {} libraries to {} ({})",
            report.word_count,
            report.libraries.len() - report.skipped().len(),
            report.output_path.display(),
            report.format
        );

        let skipped = report.skipped();
        if !skipped.is_empty() {
            output.push_str(&format!("\nSkipped (not installed): {}", skipped.join(", ")));
        }

        Ok(output)
    }

    async fn build_options(&self, request: &GenerateRequest) -> Result<DictionaryOptions> {
        let mut options = DictionaryOptions::new()
            .with_dedupe(request.dedupe)
            .with_split_identifiers(request.split)
            .with_min_length(request.min_length);

        for path in &request.exclude {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read word list {}", path.display()))?;
            options = options.with_exclude(parse_word_list(&content));
        }

        Ok(options)
    }
}
