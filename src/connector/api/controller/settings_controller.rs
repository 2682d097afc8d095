use std::path::Path;

use anyhow::Result;
use serde_json::{json, Map};

/// Renders the `.vscode/settings.json` fragment that registers a custom dictionary.
pub struct SettingsController;

impl SettingsController {
    pub fn new() -> Self {
        Self
    }

    pub fn settings(&self, name: &str, path: &str) -> Result<String> {
        let path = if Path::new(path).is_absolute() {
            path.to_string()
        } else {
            format!("${{workspaceFolder}}/{}", path.trim_start_matches("./"))
        };
        let mut dictionaries = Map::new();
        dictionaries.insert(
            name.to_string(),
            json!({
                "name": name,
                "path": path,
                "addWords": true,
                "scope": "workspace"
            }),
        );
        let settings = json!({ "cSpell.customDictionaries": dictionaries });

        Ok(serde_json::to_string_pretty(&settings)?)
    }
}

impl Default for SettingsController {
    fn default() -> Self {
        Self::new()
    }
}
