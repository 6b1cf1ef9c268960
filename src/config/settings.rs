//! Editor settings for the `markdownlint` section

use super::{ConfigSource, GlobalRc, MergeStrategy, RuleMap};
use crate::types::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Settings section name, also the rc app name
pub const SETTINGS_SECTION: &str = "markdownlint";

/// Options the editor passes to the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Rule configuration with the highest precedence
    pub config: Option<RuleMap>,
    /// Lint when a document opens
    pub on_open: bool,
    /// Lint when a document changes
    pub on_change: bool,
    /// Lint when a document is saved
    pub on_save: bool,
    /// How sources combine for the same rule key
    pub merge_strategy: MergeStrategy,
    /// markdownlint executable to run instead of the one on `PATH`
    pub command: Option<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            config: None,
            on_open: true,
            on_change: true,
            on_save: true,
            merge_strategy: MergeStrategy::Shallow,
            command: None,
        }
    }
}

impl EditorSettings {
    /// Read settings from a JSON payload
    ///
    /// Accepts either the section itself or an object wrapping it under
    /// `markdownlint`. `null` yields the defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        let section = value.get(SETTINGS_SECTION).unwrap_or(value);
        if section.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(section.clone())?)
    }

    /// Config sources in increasing precedence: global, project, settings
    pub fn sources(&self, root: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = vec![ConfigSource::Global(GlobalRc::discover(SETTINGS_SECTION))];
        if let Some(root) = root {
            sources.push(ConfigSource::Project {
                root: root.to_path_buf(),
            });
        }
        if let Some(config) = &self.config {
            sources.push(ConfigSource::Settings(config.clone()));
        }
        sources
    }
}
