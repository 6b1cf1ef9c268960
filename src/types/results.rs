//! Lint results keyed by document name

use crate::types::LintFinding;
use std::collections::HashMap;
use std::fmt;

/// Findings returned by one engine invocation, keyed by document name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintResults {
    /// Map of document name to findings
    pub results: HashMap<String, Vec<LintFinding>>,
}

impl LintResults {
    /// Create a new empty LintResults
    pub fn new() -> Self {
        Self::default()
    }

    /// Add findings for a document, appending to any already present
    pub fn add(&mut self, name: String, findings: Vec<LintFinding>) {
        self.results.entry(name).or_default().extend(findings);
    }

    /// Get findings for a specific document
    pub fn get(&self, name: &str) -> Option<&[LintFinding]> {
        self.results.get(name).map(|v| v.as_slice())
    }

    /// Remove and return the findings for a document (empty when absent)
    pub fn take(&mut self, name: &str) -> Vec<LintFinding> {
        self.results.remove(name).unwrap_or_default()
    }

    /// Total number of findings across all documents
    pub fn finding_count(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    /// Number of findings that carry fix information
    pub fn fixable_count(&self) -> usize {
        self.results
            .values()
            .map(|findings| findings.iter().filter(|f| f.is_fixable()).count())
            .sum()
    }

    /// Check if results are empty (no findings)
    pub fn is_empty(&self) -> bool {
        self.results.values().all(|v| v.is_empty())
    }
}

impl fmt::Display for LintResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.results.keys().collect();
        names.sort();

        let mut first = true;
        for name in names {
            for finding in &self.results[name] {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "{}: {}", name, finding)?;
            }
        }
        Ok(())
    }
}

impl IntoIterator for LintResults {
    type Item = (String, Vec<LintFinding>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Vec<LintFinding>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
