//! Merging configuration sources into one effective configuration

use super::{ConfigSource, EffectiveConfig, MergeStrategy};
use crate::types::BridgeError;
use log::{debug, warn};

/// Outcome of one resolution
#[derive(Debug, Default)]
pub struct Resolved {
    /// Merge of every source that loaded
    pub config: EffectiveConfig,
    /// Sources that failed to read or parse, in source order
    pub failures: Vec<BridgeError>,
}

/// Merges configuration sources in order, later sources winning
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver {
    strategy: MergeStrategy,
}

impl ConfigResolver {
    /// Resolver with shallow per-rule merging
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with the given merge strategy
    pub fn with_strategy(strategy: MergeStrategy) -> Self {
        Self { strategy }
    }

    /// The merge strategy in use
    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Merge `sources`, given in increasing precedence
    ///
    /// Each call starts from an empty configuration. A source that fails is
    /// recorded in [`Resolved::failures`] and contributes nothing; the others
    /// still apply. The result never carries an `extends` key.
    pub fn resolve(&self, sources: &[ConfigSource]) -> Resolved {
        let mut resolved = Resolved::default();

        for source in sources {
            match source.load() {
                Ok(Some(rules)) => {
                    debug!("Merging {} ({} key(s))", source, rules.len());
                    resolved.config.merge(rules, self.strategy);
                }
                Ok(None) => debug!("No {}", source),
                Err(e) => resolved.failures.push(e),
            }
        }

        // Only file sources can resolve `extends`
        if let Some(extends) = resolved.config.remove("extends") {
            warn!("Ignoring unresolved extends: {}", extends.to_value());
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalRc, RuleMap, RuleSetting};
    use serde_json::json;

    fn settings(value: serde_json::Value) -> ConfigSource {
        ConfigSource::Settings(serde_json::from_value::<RuleMap>(value).unwrap())
    }

    #[test]
    fn test_precedence_across_sources() {
        let home = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            home.path().join(".markdownlintrc"),
            r#"{"MD001": "global", "MD002": "global", "MD003": "global"}"#,
        )
        .unwrap();
        std::fs::write(
            root.path().join(".markdownlint.yaml"),
            "MD002: project\nMD003: project\n",
        )
        .unwrap();

        let sources = vec![
            ConfigSource::Global(GlobalRc::new("markdownlint").with_home_dir(home.path())),
            ConfigSource::Project {
                root: root.path().to_path_buf(),
            },
            settings(json!({"MD003": "settings"})),
        ];
        let resolved = ConfigResolver::new().resolve(&sources);

        assert!(resolved.failures.is_empty());
        assert_eq!(
            resolved.config.to_json(),
            json!({"MD001": "global", "MD002": "project", "MD003": "settings"})
        );
    }

    #[test]
    fn test_malformed_project_is_isolated() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(".markdownlint.json"), "{ oops").unwrap();

        let sources = vec![
            settings(json!({"MD001": false})),
            ConfigSource::Project {
                root: root.path().to_path_buf(),
            },
            settings(json!({"MD013": false})),
        ];
        let resolved = ConfigResolver::new().resolve(&sources);

        assert_eq!(resolved.failures.len(), 1);
        assert_eq!(resolved.config.to_json(), json!({"MD001": false, "MD013": false}));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let sources = vec![settings(json!({"MD013": {"line_length": 80}}))];
        let resolver = ConfigResolver::with_strategy(MergeStrategy::Deep);
        let first = resolver.resolve(&sources);
        let second = resolver.resolve(&sources);
        assert_eq!(first.config, second.config);
        assert_eq!(first.config.get("MD013").map(RuleSetting::to_value), Some(json!({"line_length": 80})));
    }

    #[test]
    fn test_settings_extends_is_dropped() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("base.json"), r#"{"MD001": false}"#).unwrap();
        std::fs::write(
            root.path().join(".markdownlint.json"),
            r#"{"extends": "base.json", "MD013": false}"#,
        )
        .unwrap();

        let sources = vec![
            ConfigSource::Project {
                root: root.path().to_path_buf(),
            },
            settings(json!({"extends": "./team.json", "MD033": false})),
        ];
        let resolved = ConfigResolver::new().resolve(&sources);

        assert!(resolved.failures.is_empty());
        assert_eq!(
            resolved.config.to_json(),
            json!({"MD001": false, "MD013": false, "MD033": false})
        );
    }
}
