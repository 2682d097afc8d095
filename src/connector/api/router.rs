use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{
    GenerateController, GenerateRequest, InspectController, LibrariesController,
    SettingsController,
};

pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
    libraries_controller: LibrariesController<'a>,
    inspect_controller: InspectController<'a>,
    settings_controller: SettingsController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
            libraries_controller: LibrariesController::new(container),
            inspect_controller: InspectController::new(container),
            settings_controller: SettingsController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate {
                requirements,
                output,
                format,
                split,
                no_dedupe,
                min_length,
                exclude,
                dry_run,
            } => {
                self.generate_controller
                    .generate(GenerateRequest {
                        requirements,
                        output,
                        format: format.map(Into::into),
                        split,
                        dedupe: !no_dedupe,
                        min_length,
                        exclude,
                        dry_run,
                    })
                    .await
            }
            Commands::Libraries {
                requirements,
                format,
            } => self.libraries_controller.list(requirements, format).await,
            Commands::Inspect { library, format } => {
                self.inspect_controller.inspect(library, format).await
            }
            Commands::Settings { name, path } => self.settings_controller.settings(&name, &path),
        }
    }
}
