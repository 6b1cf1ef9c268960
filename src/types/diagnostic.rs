//! Editor-facing positions, diagnostics and edits
//!
//! Lines are zero-based and characters count UTF-16 code units, the same
//! convention the Language Server Protocol uses by default.

use std::fmt;

/// Source tag attached to every published diagnostic
pub const SOURCE: &str = "markdownlint";

/// Zero-based line/character position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Zero-based line
    pub line: u32,
    /// Zero-based UTF-16 offset within the line
    pub character: u32,
}

impl Position {
    /// Create a position
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Inclusive start
    pub start: Position,
    /// Exclusive end
    pub end: Position,
}

impl Range {
    /// Create a range
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at a position
    pub const fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Whether the range is zero-width
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two ranges touch or intersect
    ///
    /// Endpoints count, so a zero-width range at the edge of a selection is
    /// still considered inside it.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether two ranges share at least one line
    pub fn shares_line(&self, other: &Range) -> bool {
        self.start.line <= other.end.line && other.start.line <= self.end.line
    }
}

/// Severity of a diagnostic
///
/// markdownlint has no severity levels, so every finding is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Warning level
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Index of the finding a diagnostic was derived from
///
/// Resolves against the finding list of the snapshot the diagnostic was
/// published with; it never owns the finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FindingId(pub usize);

/// A problem marker shown by the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Highlighted span
    pub range: Range,
    /// Always [`Severity::Warning`] for lint findings
    pub severity: Severity,
    /// Primary rule name (e.g. `MD009`)
    pub code: Option<String>,
    /// Always [`SOURCE`]
    pub source: String,
    /// Human-readable message
    pub message: String,
    /// Finding this diagnostic came from
    pub origin: FindingId,
}

impl Diagnostic {
    /// The part of the message before the first colon (the rule moniker)
    pub fn rule_moniker(&self) -> &str {
        self.message
            .split_once(':')
            .map_or(self.message.as_str(), |(head, _)| head)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.range.start.line + 1,
            self.range.start.character + 1,
            self.severity,
            self.message
        )
    }
}

/// A text replacement addressed by range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Replaced span
    pub range: Range,
    /// Replacement text
    pub new_text: String,
}

impl TextEdit {
    /// Replace `range` with `new_text`
    pub fn replace(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Insert `text` at `at`
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self::replace(Range::point(at), text)
    }

    /// Delete `range`
    pub fn delete(range: Range) -> Self {
        Self::replace(range, String::new())
    }
}
