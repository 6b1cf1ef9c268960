//! The lint engine: configuration state, linting, fixes and code actions
//!
//! [`LintEngine`] is the composition root the hosts drive. It owns the
//! current configuration snapshot, runs the [`Linter`] against document text,
//! keeps the diagnostics it published per document and turns them into code
//! actions. Errors below this layer are logged and absorbed here: a failed
//! lint publishes no diagnostics, a failed config source contributes
//! nothing. [`LintEngine::try_lint`] is the one way to see a linter failure.

mod actions;
mod published;

pub use actions::{
    ActionKind, CodeAction, DISABLE_FILE, DISABLE_NEXT_LINE, FIX_ALL_COMMAND, FIX_ALL_TITLE,
};
pub use published::{DiagnosticStore, PublishedDiagnostics};

use crate::config::{ConfigResolver, ConfigSource, EffectiveConfig, MergeStrategy};
use crate::diagnostics::map_findings;
use crate::fix::{apply_all_fixes, replace_document_edit, single_fix_edit};
use crate::helpers::{end_position, preferred_line_ending, split_lines};
use crate::linter::{LintRequest, Linter, MarkdownlintCli};
use crate::types::{Diagnostic, LintFinding, Position, Range, Result, TextDocument, TextEdit};
use log::{debug, error, info, warn};
use std::sync::{Arc, PoisonError, RwLock};

/// An immutable effective configuration with its generation number
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    /// Starts at 1 and grows by one on every reconfiguration
    pub version: u64,
    /// Configuration handed to every lint call
    pub config: Arc<EffectiveConfig>,
}

/// Whether a configuration has been loaded yet
#[derive(Debug, Clone, Default)]
pub enum EngineState {
    /// Nothing loaded; linting uses an empty configuration
    #[default]
    Unconfigured,
    /// A snapshot is in place
    Configured(Arc<ConfigSnapshot>),
}

impl EngineState {
    /// Current snapshot, if any
    pub fn snapshot(&self) -> Option<&Arc<ConfigSnapshot>> {
        match self {
            EngineState::Unconfigured => None,
            EngineState::Configured(snapshot) => Some(snapshot),
        }
    }

    fn version(&self) -> u64 {
        self.snapshot().map_or(0, |snapshot| snapshot.version)
    }
}

/// Lints documents and derives diagnostics, fixes and code actions
pub struct LintEngine {
    linter: RwLock<Arc<dyn Linter>>,
    resolver: RwLock<ConfigResolver>,
    state: RwLock<EngineState>,
    published: DiagnosticStore,
}

impl Default for LintEngine {
    fn default() -> Self {
        Self::new(MarkdownlintCli::default())
    }
}

impl std::fmt::Debug for LintEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintEngine")
            .field("state", &*read(&self.state))
            .field("published", &self.published.len())
            .finish_non_exhaustive()
    }
}

impl LintEngine {
    /// Engine driving `linter`, not yet configured
    pub fn new(linter: impl Linter + 'static) -> Self {
        let linter: Arc<dyn Linter> = Arc::new(linter);
        Self {
            linter: RwLock::new(linter),
            resolver: RwLock::new(ConfigResolver::new()),
            state: RwLock::new(EngineState::Unconfigured),
            published: DiagnosticStore::new(),
        }
    }

    /// Swap the linter used by later calls
    pub fn set_linter(&self, linter: impl Linter + 'static) {
        let linter: Arc<dyn Linter> = Arc::new(linter);
        *write(&self.linter) = linter;
    }

    /// Merge strategy used by later reconfigurations
    pub fn set_merge_strategy(&self, strategy: MergeStrategy) {
        *write(&self.resolver) = ConfigResolver::with_strategy(strategy);
    }

    /// Resolve `sources` and swap in the result
    ///
    /// Failing sources are logged and skipped. The engine is configured
    /// afterwards whatever failed.
    pub fn configure(&self, sources: &[ConfigSource]) -> Arc<ConfigSnapshot> {
        let resolver = *read(&self.resolver);
        let resolved = resolver.resolve(sources);
        for failure in &resolved.failures {
            warn!("Ignoring configuration source: {}", failure);
        }
        info!("Effective configuration: {}", resolved.config.to_json());

        let mut state = write(&self.state);
        let snapshot = Arc::new(ConfigSnapshot {
            version: state.version() + 1,
            config: Arc::new(resolved.config),
        });
        *state = EngineState::Configured(Arc::clone(&snapshot));
        snapshot
    }

    /// Re-resolve configuration on request
    pub fn reload(&self, sources: &[ConfigSource]) -> Arc<ConfigSnapshot> {
        info!("Reloading configuration");
        self.configure(sources)
    }

    /// Current configuration state
    pub fn state(&self) -> EngineState {
        read(&self.state).clone()
    }

    /// Current snapshot, `None` while unconfigured
    pub fn snapshot(&self) -> Option<Arc<ConfigSnapshot>> {
        read(&self.state).snapshot().cloned()
    }

    /// Whether `configure` has run
    pub fn is_configured(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Lint a document and publish its diagnostics
    ///
    /// Returns `None` for non-Markdown documents. A linter failure is logged
    /// and published as zero diagnostics.
    pub fn lint(&self, document: &TextDocument) -> Option<Vec<Diagnostic>> {
        if !document.is_markdown() {
            debug!("Skipping {} ({})", document.uri, document.language_id);
            return None;
        }

        let findings = self.run_linter(document);
        Some(self.publish(document, findings))
    }

    /// Like [`lint`](Self::lint), but a linter failure is returned instead of
    /// being published as zero diagnostics
    ///
    /// Nothing is published when the linter fails.
    pub fn try_lint(&self, document: &TextDocument) -> Result<Option<Vec<Diagnostic>>> {
        if !document.is_markdown() {
            return Ok(None);
        }
        let findings = self.lint_findings(document)?;
        Ok(Some(self.publish(document, findings)))
    }

    fn publish(&self, document: &TextDocument, findings: Vec<LintFinding>) -> Vec<Diagnostic> {
        let diagnostics = map_findings(&findings);
        self.published.publish(PublishedDiagnostics {
            uri: document.uri.clone(),
            version: document.version,
            findings: findings.into(),
            diagnostics: diagnostics.clone(),
        });
        diagnostics
    }

    /// Whole-document edit applying every available fix
    ///
    /// Lints the current text afresh. `None` when the document is not
    /// Markdown or nothing changes.
    pub fn fix_all(&self, document: &TextDocument) -> Option<TextEdit> {
        if !document.is_markdown() {
            return None;
        }
        let findings = self.run_linter(document);
        let fixed = apply_all_fixes(&document.text, &findings);
        replace_document_edit(&document.text, &fixed)
    }

    /// Code actions for `selection`
    ///
    /// Fix actions come from the diagnostics published for this exact
    /// document version on the selected lines; stale diagnostics offer none.
    pub fn code_actions(&self, document: &TextDocument, selection: Range) -> Vec<CodeAction> {
        let mut actions = Vec::new();
        if !document.is_markdown() {
            return actions;
        }

        let whole = covers_document(&document.text, selection);
        let mut fixable = Vec::new();

        match self.published.current(&document.uri, document.version) {
            Some(published) => {
                for diagnostic in &published.diagnostics {
                    if !diagnostic.range.shares_line(&selection) {
                        continue;
                    }
                    let Some(fix) = published
                        .finding(diagnostic.origin)
                        .and_then(|finding| finding.fix_info.as_ref())
                    else {
                        continue;
                    };

                    fixable.push(diagnostic.clone());
                    if whole {
                        continue;
                    }
                    match single_fix_edit(&document.text, diagnostic, fix) {
                        Ok(edit) => actions.push(CodeAction::quick_fix(diagnostic, edit)),
                        Err(e) => debug!("No quick fix for {}: {}", diagnostic, e),
                    }
                }
            }
            None => debug!(
                "No diagnostics for {} version {}",
                document.uri, document.version
            ),
        }

        let line_ending = preferred_line_ending(&document.text);
        if selection.start.line == selection.end.line && selection.start.character == 0 {
            actions.push(CodeAction::disable_line(selection.start.line, line_ending));
        }
        if whole {
            actions.push(CodeAction::disable_file(line_ending));
        }
        if !fixable.is_empty() {
            actions.push(CodeAction::fix_all(fixable));
        }

        actions
    }

    /// Forget a closed document
    pub fn close(&self, uri: &str) {
        self.published.remove(uri);
    }

    /// Diagnostics last published for a document
    pub fn published(&self, uri: &str) -> Option<Arc<PublishedDiagnostics>> {
        self.published.get(uri)
    }

    fn run_linter(&self, document: &TextDocument) -> Vec<LintFinding> {
        self.lint_findings(document).unwrap_or_else(|e| {
            error!("Linting {} failed: {}", document.uri, e);
            Vec::new()
        })
    }

    fn lint_findings(&self, document: &TextDocument) -> Result<Vec<LintFinding>> {
        let config = self
            .snapshot()
            .map(|snapshot| Arc::clone(&snapshot.config))
            .unwrap_or_default();
        let linter = Arc::clone(&*read(&self.linter));

        let request = LintRequest {
            config: &config,
            name: &document.uri,
            text: &document.text,
        };
        let mut results = linter.lint(&request)?;
        Ok(results.take(&document.uri))
    }
}

/// Whether `selection` spans the whole document
///
/// Hosts express "everything" either as the end of the last line or as the
/// start of the line after it.
fn covers_document(text: &str, selection: Range) -> bool {
    let line_count = split_lines(text).len() as u32;
    selection.start == Position::new(0, 0)
        && (selection.end == end_position(text) || selection.end == Position::new(line_count, 0))
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
