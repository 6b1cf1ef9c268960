//! Configuration sources: rc-style global files, project files, editor settings

use super::{RuleMap, RuleSetting, merge_objects};
use crate::types::{BridgeError, Result};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Project config file names, in lookup order
pub const PROJECT_CONFIG_FILES: [&str; 4] = [
    ".markdownlint.json",
    ".markdownlint.yaml",
    ".markdownlint.yml",
    ".markdownlint.toml",
];

/// One place configuration can come from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// rc-style global configuration
    Global(GlobalRc),
    /// First project config file found in `root`
    Project {
        /// Workspace root
        root: PathBuf,
    },
    /// The `config` object from editor settings
    Settings(RuleMap),
}

impl ConfigSource {
    /// Load the source
    ///
    /// `Ok(None)` means the source simply is not there (no project file, no rc
    /// files); that is not a failure.
    pub fn load(&self) -> Result<Option<RuleMap>> {
        match self {
            ConfigSource::Global(rc) => rc.load(),
            ConfigSource::Project { root } => load_project_config(root),
            ConfigSource::Settings(rules) => Ok(Some(rules.clone())),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Global(rc) => write!(f, "global config ({}rc)", rc.app),
            ConfigSource::Project { root } => write!(f, "local config ({})", root.display()),
            ConfigSource::Settings(_) => write!(f, "config from editor settings"),
        }
    }
}

/// Parse config text, trying JSON, then YAML, then TOML
///
/// The first parser producing a mapping wins. On total failure the last
/// parser's message is reported.
pub fn parse_config_text(text: &str, origin: &str) -> Result<RuleMap> {
    if let Ok(rules) = serde_json::from_str::<RuleMap>(text) {
        return Ok(rules);
    }
    if let Ok(rules) = serde_yaml_ng::from_str::<RuleMap>(text) {
        return Ok(rules);
    }
    toml::from_str::<RuleMap>(text).map_err(|e| BridgeError::ConfigParse {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| BridgeError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a config file and resolve its `extends` chain
///
/// The parent is loaded first and the child's keys replace the parent's.
/// `extends` paths are relative to the file that names them.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<RuleMap> {
    let mut seen = HashSet::new();
    read_with_extends(path.as_ref(), &mut seen)
}

fn read_with_extends(path: &Path, seen: &mut HashSet<PathBuf>) -> Result<RuleMap> {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !seen.insert(key) {
        return Err(BridgeError::ConfigParse {
            origin: path.display().to_string(),
            message: "circular extends".to_string(),
        });
    }

    let text = read_text(path)?;
    let mut rules = parse_config_text(&text, &path.display().to_string())?;

    match rules.remove("extends") {
        Some(RuleSetting::Other(Value::String(parent))) => {
            let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
            let parent_path = base_dir.join(parent);
            debug!("{} extends {}", path.display(), parent_path.display());

            let mut resolved = read_with_extends(&parent_path, seen)?;
            resolved.extend(rules);
            Ok(resolved)
        }
        Some(RuleSetting::Other(Value::Null)) | None => Ok(rules),
        Some(other) => Err(BridgeError::ConfigParse {
            origin: path.display().to_string(),
            message: format!("extends must be a path, got {}", other.to_value()),
        }),
    }
}

/// First existing project config file in `root`
pub fn find_project_config(root: impl AsRef<Path>) -> Option<PathBuf> {
    PROJECT_CONFIG_FILES
        .iter()
        .map(|name| root.as_ref().join(name))
        .find(|candidate| candidate.exists())
}

/// Load the project config file for `root`
///
/// The search stops at the first existing candidate, even when that file
/// fails to parse.
pub fn load_project_config(root: impl AsRef<Path>) -> Result<Option<RuleMap>> {
    match find_project_config(root) {
        Some(path) => {
            debug!("Using project config {}", path.display());
            read_config_file(&path).map(Some)
        }
        None => Ok(None),
    }
}

/// rc-style global configuration for one app name
///
/// Layers, lowest precedence first: `/etc/<app>rc`, `/etc/<app>/config`,
/// `~/.<app>rc`, `~/.<app>/config`, `~/.config/<app>`,
/// `~/.config/<app>/config`, the nearest `.<app>rc` above the start
/// directory, a file named by `<app>_config`, then `<app>_*` environment
/// variables. Layers are deep-merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRc {
    app: String,
    etc_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
    start_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl GlobalRc {
    /// An rc lookup with no directories and no environment
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            etc_dir: None,
            home_dir: None,
            start_dir: None,
            env: Vec::new(),
        }
    }

    /// The rc lookup markdownlint users expect, from the real environment
    pub fn discover(app: impl Into<String>) -> Self {
        let app = app.into();
        let prefix = format!("{}_", app).to_lowercase();
        let env = std::env::vars()
            .filter(|(key, _)| key.to_lowercase().starts_with(&prefix))
            .collect();

        Self {
            app,
            etc_dir: cfg!(unix).then(|| PathBuf::from("/etc")),
            home_dir: dirs::home_dir(),
            start_dir: std::env::current_dir().ok(),
            env,
        }
    }

    /// Override the system config directory
    pub fn with_etc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.etc_dir = Some(dir.into());
        self
    }

    /// Override the home directory
    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Directory the local `.<app>rc` search starts from
    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Environment variables to consider
    pub fn with_env(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = vars.into_iter().collect();
        self
    }

    /// Lowercased `<app>_`; environment keys match it case-insensitively
    fn env_prefix(&self) -> String {
        format!("{}_", self.app).to_lowercase()
    }

    /// The part of `key` after the app prefix, if it has one
    fn strip_env_prefix<'a>(&self, key: &'a str) -> Option<&'a str> {
        let prefix = self.env_prefix();
        let head = key.get(..prefix.len())?;
        head.eq_ignore_ascii_case(&prefix).then(|| &key[prefix.len()..])
    }

    fn is_config_key(&self, key: &str) -> bool {
        self.strip_env_prefix(key)
            .is_some_and(|rest| rest.eq_ignore_ascii_case("config"))
    }

    /// rc files that exist, lowest precedence first
    pub fn files(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(etc) = &self.etc_dir {
            candidates.push(etc.join(format!("{}rc", self.app)));
            candidates.push(etc.join(&self.app).join("config"));
        }
        if let Some(home) = &self.home_dir {
            candidates.push(home.join(format!(".{}rc", self.app)));
            candidates.push(home.join(format!(".{}", self.app)).join("config"));
            candidates.push(home.join(".config").join(&self.app));
            candidates.push(home.join(".config").join(&self.app).join("config"));
        }
        if let Some(local) = self.find_local_rc() {
            candidates.push(local);
        }
        if let Some((_, path)) = self
            .env
            .iter()
            .find(|(key, _)| self.is_config_key(key))
        {
            candidates.push(PathBuf::from(path));
        }

        let mut files: Vec<PathBuf> = Vec::new();
        for candidate in candidates {
            if candidate.is_file() && !files.contains(&candidate) {
                files.push(candidate);
            }
        }
        files
    }

    fn find_local_rc(&self) -> Option<PathBuf> {
        let name = format!(".{}rc", self.app);
        let mut dir = self.start_dir.clone()?;
        loop {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Settings from `<app>_*` environment variables
    ///
    /// `__` separates nested keys. Values that parse as JSON keep their type,
    /// anything else stays a string.
    fn env_layer(&self) -> Map<String, Value> {
        let mut layer = Map::new();

        for (key, raw) in &self.env {
            let Some(path) = self.strip_env_prefix(key) else {
                continue;
            };
            if self.is_config_key(key) {
                continue;
            }
            let parts: Vec<&str> = path.split("__").filter(|p| !p.is_empty()).collect();
            let Some((last, parents)) = parts.split_last() else {
                continue;
            };

            let mut value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));
            let mut key = last.to_string();
            for parent in parents.iter().rev() {
                let mut inner = Map::new();
                inner.insert(key, value);
                value = Value::Object(inner);
                key = parent.to_string();
            }

            let mut entry = Map::new();
            entry.insert(key, value);
            merge_objects(&mut layer, entry);
        }
        layer
    }

    /// Merge every layer; `Ok(None)` when no layer exists
    ///
    /// Each rc file's `extends` is resolved relative to that file.
    pub fn load(&self) -> Result<Option<RuleMap>> {
        let files = self.files();
        let env = self.env_layer();
        if files.is_empty() && env.is_empty() {
            return Ok(None);
        }

        let mut merged = Map::new();
        for file in &files {
            debug!("Reading rc file {}", file.display());
            let layer = read_config_file(file)?
                .into_iter()
                .map(|(key, setting)| (key, setting.to_value()))
                .collect();
            merge_objects(&mut merged, layer);
        }
        merge_objects(&mut merged, env);

        Ok(Some(
            merged
                .into_iter()
                .map(|(key, value)| (key, RuleSetting::from(value)))
                .collect(),
        ))
    }
}
