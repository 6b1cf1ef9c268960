//! Lint through the `markdownlint` command-line tool

use super::{LintRequest, Linter};
use crate::types::{BridgeError, LintFinding, LintResults, Result};
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

/// Executable looked up on `PATH` when none is configured
pub const DEFAULT_COMMAND: &str = "markdownlint";

/// Runs `markdownlint --stdin --json --config <file>` per lint request
///
/// The effective configuration is written to a temporary JSON file for the
/// duration of the call. Exit status 0 means no findings, 1 means findings as
/// a JSON array on stderr, anything else is an engine failure.
#[derive(Debug, Clone)]
pub struct MarkdownlintCli {
    command: String,
    extra_args: Vec<String>,
}

impl Default for MarkdownlintCli {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND)
    }
}

impl MarkdownlintCli {
    /// Use `command` as the markdownlint executable
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments passed before the bridge's own
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The executable being run
    pub fn command(&self) -> &str {
        &self.command
    }

    fn engine_error(&self, what: impl std::fmt::Display) -> BridgeError {
        BridgeError::LintEngine(format!("{}: {}", self.command, what))
    }
}

impl Linter for MarkdownlintCli {
    fn lint(&self, request: &LintRequest<'_>) -> Result<LintResults> {
        let mut config_file = tempfile::Builder::new()
            .prefix("mdlint-bridge-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(&mut config_file, &request.config.to_json())?;
        config_file.flush()?;

        let mut child = Command::new(&self.command)
            .args(&self.extra_args)
            .arg("--stdin")
            .arg("--json")
            .arg("--config")
            .arg(config_file.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.engine_error(format!("cannot start: {}", e)))?;

        // The child is always waited on, even when it stopped reading early
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(request.text.as_bytes()),
            None => Ok(()),
        };
        let output = child
            .wait_with_output()
            .map_err(|e| self.engine_error(e))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if let Err(e) = written {
            return Err(self.engine_error(format!(
                "cannot write document: {}: {}",
                e,
                stderr.trim()
            )));
        }

        let mut results = LintResults::new();
        match output.status.code() {
            Some(0) => results.add(request.name.to_string(), Vec::new()),
            Some(1) => {
                let findings = parse_json_output(&stderr).map_err(|e| self.engine_error(e))?;
                debug!("{} finding(s) for {}", findings.len(), request.name);
                results.add(request.name.to_string(), findings);
            }
            code => {
                let status = code.map_or_else(|| "a signal".to_string(), |c| c.to_string());
                return Err(self.engine_error(format!(
                    "exited with {}: {}",
                    status,
                    stderr.trim()
                )));
            }
        }
        Ok(results)
    }
}

/// Parse the `--json` output of markdownlint
///
/// Empty output means no findings.
pub fn parse_json_output(output: &str) -> Result<Vec<LintFinding>> {
    let output = output.trim();
    if output.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(output)?)
}
