//! Configuration parsing and merging
//!
//! The effective configuration is a plain rule-name to setting mapping. Rule
//! names are never validated here; markdownlint validates its own
//! configuration, and unknown keys pass through untouched.

mod resolver;
mod settings;
mod sources;

pub use resolver::{ConfigResolver, Resolved};
pub use settings::{EditorSettings, SETTINGS_SECTION};
pub use sources::{
    ConfigSource, GlobalRc, PROJECT_CONFIG_FILES, find_project_config, load_project_config,
    parse_config_text, read_config_file,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Raw rule settings as read from one source
pub type RuleMap = BTreeMap<String, RuleSetting>;

/// Configuration for an individual rule (or any other top-level key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// Simple boolean (enabled/disabled)
    Enabled(bool),

    /// Detailed configuration with options
    Options(Map<String, Value>),

    /// Anything else (severity strings, `extends` paths, ...), kept verbatim
    Other(Value),
}

impl RuleSetting {
    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            RuleSetting::Enabled(enabled) => Value::Bool(*enabled),
            RuleSetting::Options(options) => Value::Object(options.clone()),
            RuleSetting::Other(value) => value.clone(),
        }
    }
}

impl From<Value> for RuleSetting {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(enabled) => RuleSetting::Enabled(enabled),
            Value::Object(options) => RuleSetting::Options(options),
            other => RuleSetting::Other(other),
        }
    }
}

/// How a later source combines with an earlier one for the same rule key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// The later entry replaces the earlier one as a whole
    #[default]
    Shallow,
    /// Nested option objects are merged key by key
    Deep,
}

/// The merged rule configuration handed to the lint engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveConfig {
    rules: RuleMap,
}

impl EffectiveConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already merged mapping
    pub fn from_rules(rules: RuleMap) -> Self {
        Self { rules }
    }

    /// Merge a source on top of this configuration
    pub fn merge(&mut self, other: RuleMap, strategy: MergeStrategy) {
        match strategy {
            MergeStrategy::Shallow => self.rules.extend(other),
            MergeStrategy::Deep => {
                for (key, incoming) in other {
                    match (self.rules.get_mut(&key), incoming) {
                        (Some(RuleSetting::Options(base)), RuleSetting::Options(over)) => {
                            merge_objects(base, over);
                        }
                        (_, incoming) => {
                            self.rules.insert(key, incoming);
                        }
                    }
                }
            }
        }
    }

    /// Get the setting for a key
    pub fn get(&self, key: &str) -> Option<&RuleSetting> {
        self.rules.get(key)
    }

    /// Remove a key, returning its setting
    pub fn remove(&mut self, key: &str) -> Option<RuleSetting> {
        self.rules.remove(key)
    }

    /// Check if a rule is enabled, honoring the `default` key
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match self.get(rule_name) {
            Some(RuleSetting::Enabled(enabled)) => *enabled,
            Some(RuleSetting::Options(_)) | Some(RuleSetting::Other(_)) => true,
            None => !matches!(self.get("default"), Some(RuleSetting::Enabled(false))),
        }
    }

    /// Iterate over settings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleSetting)> {
        self.rules.iter()
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no source contributed anything
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Borrow the underlying mapping
    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.rules
                .iter()
                .map(|(key, setting)| (key.clone(), setting.to_value()))
                .collect(),
        )
    }
}

/// deep-extend style merge: objects recurse, everything else replaces
pub(crate) fn merge_objects(base: &mut Map<String, Value>, over: Map<String, Value>) {
    for (key, value) in over {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(inner)), Value::Object(value)) => merge_objects(inner, value),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules(value: Value) -> RuleMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_config_creation() {
        let config = EffectiveConfig::new();
        assert!(config.is_empty());
    }

    #[test]
    fn test_rule_setting_shapes() {
        let map = rules(json!({
            "default": true,
            "MD013": { "line_length": 120 },
            "MD033": false,
            "extends": "base.json",
            "MD007": 4
        }));
        assert_eq!(map["default"], RuleSetting::Enabled(true));
        assert!(matches!(map["MD013"], RuleSetting::Options(_)));
        assert_eq!(map["extends"], RuleSetting::Other(json!("base.json")));
        assert_eq!(map["MD007"], RuleSetting::Other(json!(4)));
    }

    #[test]
    fn test_shallow_merge_replaces_whole_entry() {
        let mut config = EffectiveConfig::new();
        config.merge(
            rules(json!({"MD013": {"line_length": 100, "tables": false}, "MD001": false})),
            MergeStrategy::Shallow,
        );
        config.merge(
            rules(json!({"MD013": {"line_length": 120}})),
            MergeStrategy::Shallow,
        );

        assert_eq!(config.to_json(), json!({"MD001": false, "MD013": {"line_length": 120}}));
    }

    #[test]
    fn test_deep_merge_combines_sub_keys() {
        let mut config = EffectiveConfig::new();
        config.merge(
            rules(json!({"MD013": {"line_length": 100, "tables": false, "nested": {"a": 1}}})),
            MergeStrategy::Deep,
        );
        config.merge(
            rules(json!({"MD013": {"line_length": 120, "nested": {"b": 2}}})),
            MergeStrategy::Deep,
        );

        assert_eq!(
            config.to_json(),
            json!({"MD013": {"line_length": 120, "tables": false, "nested": {"a": 1, "b": 2}}})
        );
    }

    #[test]
    fn test_deep_merge_toggle_replaces_options() {
        let mut config = EffectiveConfig::new();
        config.merge(rules(json!({"MD013": {"line_length": 100}})), MergeStrategy::Deep);
        config.merge(rules(json!({"MD013": false})), MergeStrategy::Deep);
        assert!(!config.is_rule_enabled("MD013"));
    }

    #[test]
    fn test_is_rule_enabled_default_key() {
        let config = EffectiveConfig::from_rules(rules(json!({"default": false, "MD009": true})));
        assert!(config.is_rule_enabled("MD009"));
        assert!(!config.is_rule_enabled("MD010"));
        assert!(EffectiveConfig::new().is_rule_enabled("MD010"));
    }
}
