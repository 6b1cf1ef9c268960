//! Per-document store of published diagnostics

use crate::types::{Diagnostic, FindingId, LintFinding};
use dashmap::DashMap;
use std::sync::Arc;

/// Diagnostics published for one document version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDiagnostics {
    /// Document identity
    pub uri: String,
    /// Document version the diagnostics were computed from
    pub version: i32,
    /// Findings the diagnostics' [`FindingId`]s index into
    pub findings: Arc<[LintFinding]>,
    /// Diagnostics in finding order
    pub diagnostics: Vec<Diagnostic>,
}

impl PublishedDiagnostics {
    /// Resolve a diagnostic's back-reference
    pub fn finding(&self, id: FindingId) -> Option<&LintFinding> {
        self.findings.get(id.0)
    }

    /// Whether these diagnostics still describe `version`
    pub fn is_current(&self, version: i32) -> bool {
        self.version == version
    }
}

/// Concurrent map from document URI to its latest published diagnostics
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    entries: DashMap<String, Arc<PublishedDiagnostics>>,
}

impl DiagnosticStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was published for the document
    pub fn publish(&self, published: PublishedDiagnostics) -> Arc<PublishedDiagnostics> {
        let published = Arc::new(published);
        self.entries
            .insert(published.uri.clone(), Arc::clone(&published));
        published
    }

    /// Latest diagnostics for a document, whatever their version
    pub fn get(&self, uri: &str) -> Option<Arc<PublishedDiagnostics>> {
        self.entries.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    /// Diagnostics for a document only if computed from `version`
    pub fn current(&self, uri: &str, version: i32) -> Option<Arc<PublishedDiagnostics>> {
        self.get(uri).filter(|published| published.is_current(version))
    }

    /// Drop a document's diagnostics
    pub fn remove(&self, uri: &str) -> Option<Arc<PublishedDiagnostics>> {
        self.entries.remove(uri).map(|(_, published)| published)
    }

    /// Number of documents with diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no document has diagnostics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
