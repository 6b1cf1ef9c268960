//! Boundary to the external Markdown lint engine
//!
//! The bridge never checks Markdown itself. A [`Linter`] takes the effective
//! configuration plus named document text and returns structured findings.

mod cli;

pub use cli::{DEFAULT_COMMAND, MarkdownlintCli, parse_json_output};

use crate::config::EffectiveConfig;
use crate::types::{LintResults, Result};

/// One lint invocation
#[derive(Debug, Clone, Copy)]
pub struct LintRequest<'a> {
    /// Rule configuration to lint with
    pub config: &'a EffectiveConfig,
    /// Document name the results are keyed by
    pub name: &'a str,
    /// Document text
    pub text: &'a str,
}

/// An external lint engine
///
/// Implementations may fail (bad configuration, missing executable); the
/// [`LintEngine`](crate::engine::LintEngine) treats a failure as "no findings".
pub trait Linter: Send + Sync {
    /// Lint one document
    fn lint(&self, request: &LintRequest<'_>) -> Result<LintResults>;
}

impl<L: Linter + ?Sized> Linter for Box<L> {
    fn lint(&self, request: &LintRequest<'_>) -> Result<LintResults> {
        (**self).lint(request)
    }
}

impl<L: Linter + ?Sized> Linter for std::sync::Arc<L> {
    fn lint(&self, request: &LintRequest<'_>) -> Result<LintResults> {
        (**self).lint(request)
    }
}
