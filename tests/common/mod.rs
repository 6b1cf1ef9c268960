//! Test doubles shared by the integration tests
//!
//! `ScriptedLinter` stands in for markdownlint with three real rules so the
//! engine can be exercised end to end without the external tool:
//! MD009 (trailing spaces), MD012 (multiple blank lines) and MD018 (no space
//! after the hashes of an ATX heading).

#![allow(dead_code)]

use mdlint_bridge::helpers::{split_lines, utf16_len};
use mdlint_bridge::linter::{LintRequest, Linter};
use mdlint_bridge::types::{DeleteCount, FixDescriptor, LintFinding, LintResults, Result};
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct ScriptedLinter {
    calls: AtomicUsize,
    configs: Mutex<Vec<Value>>,
}

impl ScriptedLinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lint calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Configurations passed to each call, as JSON
    pub fn configs(&self) -> Vec<Value> {
        self.configs.lock().unwrap().clone()
    }
}

impl Linter for ScriptedLinter {
    fn lint(&self, request: &LintRequest<'_>) -> Result<LintResults> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.configs.lock().unwrap().push(request.config.to_json());

        let mut lines = split_lines(request.text);
        // The empty "line" after a final newline is not content
        if lines.len() > 1 && lines.last() == Some(&"") {
            lines.pop();
        }

        let mut findings = Vec::new();
        let mut previous_blank = false;
        for (idx, line) in lines.into_iter().enumerate() {
            let line_number = idx + 1;
            if request.config.is_rule_enabled("MD009")
                && let Some(finding) = trailing_spaces(line_number, line)
            {
                findings.push(finding);
            }
            if request.config.is_rule_enabled("MD018")
                && let Some(finding) = missing_heading_space(line_number, line)
            {
                findings.push(finding);
            }
            let blank = line.trim().is_empty();
            if request.config.is_rule_enabled("MD012") && blank && previous_blank {
                findings.push(extra_blank_line(line_number));
            }
            previous_blank = blank;
        }
        let mut results = LintResults::new();
        results.add(request.name.to_string(), findings);
        Ok(results)
    }
}

pub fn trailing_spaces(line_number: usize, line: &str) -> Option<LintFinding> {
    let trimmed = line.trim_end_matches(' ');
    let count = line.len() - trimmed.len();
    if count == 0 || trimmed.is_empty() {
        return None;
    }
    let column = utf16_len(trimmed) + 1;
    Some(LintFinding {
        line_number,
        rule_names: vec!["MD009".to_string(), "no-trailing-spaces".to_string()],
        rule_description: "Trailing spaces".to_string(),
        error_detail: Some(format!("Expected: 0 or 2; Actual: {}", count)),
        error_range: Some((column, count)),
        fix_info: Some(FixDescriptor {
            edit_column: column,
            delete_count: DeleteCount::Chars(count),
            ..Default::default()
        }),
        ..Default::default()
    })
}

pub fn missing_heading_space(line_number: usize, line: &str) -> Option<LintFinding> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t') {
        return None;
    }
    Some(LintFinding {
        line_number,
        rule_names: vec!["MD018".to_string(), "no-missing-space-atx".to_string()],
        rule_description: "No space after hash on atx style heading".to_string(),
        error_context: Some(line.to_string()),
        error_range: Some((1, hashes + 1)),
        fix_info: Some(FixDescriptor {
            edit_column: hashes + 1,
            insert_text: Some(" ".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

pub fn extra_blank_line(line_number: usize) -> LintFinding {
    LintFinding {
        line_number,
        rule_names: vec!["MD012".to_string(), "no-multiple-blanks".to_string()],
        rule_description: "Multiple consecutive blank lines".to_string(),
        error_detail: Some("Expected: 1; Actual: 2".to_string()),
        fix_info: Some(FixDescriptor {
            delete_count: DeleteCount::ToEndOfLine,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A finding with no fix
pub fn heading_increment(line_number: usize) -> LintFinding {
    LintFinding {
        line_number,
        rule_names: vec!["MD001".to_string(), "heading-increment".to_string()],
        rule_description: "Heading levels should only increment by one level at a time"
            .to_string(),
        error_detail: Some("Expected: h2; Actual: h3".to_string()),
        ..Default::default()
    }
}
