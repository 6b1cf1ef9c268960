//! # mdlint-bridge
//!
//! Surfaces [markdownlint](https://github.com/DavidAnson/markdownlint)
//! diagnostics and fixes in an editor. The crate does not check Markdown
//! itself; it drives an external engine through the [`Linter`] trait and does
//! the work around it:
//!
//! - **Configuration** merged from rc-style global files, a project
//!   `.markdownlint.{json,yaml,yml,toml}` and editor settings
//! - **Diagnostics** with UTF-16 ranges and `MD009/no-trailing-spaces: ...`
//!   messages
//! - **Fixes** for a single finding or the whole document, preserving line
//!   endings and untouched text
//! - **Code actions**: quick fixes, disable comments and fix-all
//! - **Language server** (requires `lsp` feature) and a command-line front end
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdlint_bridge::config::{ConfigSource, GlobalRc};
//! use mdlint_bridge::engine::LintEngine;
//! use mdlint_bridge::linter::MarkdownlintCli;
//! use mdlint_bridge::types::TextDocument;
//!
//! let engine = LintEngine::new(MarkdownlintCli::default());
//! engine.configure(&[
//!     ConfigSource::Global(GlobalRc::discover("markdownlint")),
//!     ConfigSource::Project { root: ".".into() },
//! ]);
//!
//! let document = TextDocument::markdown("README.md", 1, "#Title\n");
//! for diagnostic in engine.lint(&document).unwrap_or_default() {
//!     println!("{}", diagnostic);
//! }
//! if let Some(edit) = engine.fix_all(&document) {
//!     println!("{}", edit.new_text);
//! }
//! ```
//!
//! ## Configuration
//!
//! Every source is a plain markdownlint configuration object:
//!
//! ```json
//! {
//!   "default": true,
//!   "MD013": false,
//!   "MD033": {
//!     "allowed_elements": ["br", "img"]
//!   }
//! }
//! ```
//!
//! Later sources override earlier ones per rule key. A source that cannot be
//! read or parsed is skipped; the others still apply.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod fix;
pub mod helpers;
pub mod linter;
pub mod types;

#[cfg(feature = "lsp")]
pub mod lsp;

// Re-export main types and functions
pub use config::{ConfigResolver, ConfigSource, EffectiveConfig, EditorSettings, MergeStrategy};
pub use diagnostics::map_findings;
pub use engine::{CodeAction, LintEngine};
pub use fix::{apply_all_fixes, apply_single_fix};
pub use linter::{LintRequest, Linter, MarkdownlintCli};
pub use types::{BridgeError, Diagnostic, LintFinding, LintResults, Result, TextDocument, TextEdit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
