//! Findings reported by the external lint engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// One rule violation reported by the lint engine
///
/// Field names follow markdownlint's `resultVersion: 3` JSON so the engine's
/// output deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintFinding {
    /// Line number (1-based) where the violation occurs
    pub line_number: usize,

    /// Rule names (e.g., ["MD009", "no-trailing-spaces"])
    pub rule_names: Vec<String>,

    /// Rule description
    pub rule_description: String,

    /// Additional detail about the violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// Context information (excerpt from the line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_context: Option<String>,

    /// URL with more information about the rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_information: Option<String>,

    /// Column range for the violation (1-based start column, length)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_range: Option<(usize, usize)>,

    /// Fix information for automatic correction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_info: Option<FixDescriptor>,
}

impl LintFinding {
    /// Classify the attached fix, if any
    pub fn fix(&self) -> Fix {
        match &self.fix_info {
            Some(info) => Fix::from_descriptor(info, self.line_number),
            None => Fix::NoFix,
        }
    }

    /// Whether the finding carries a machine-applicable fix
    pub fn is_fixable(&self) -> bool {
        self.fix_info.is_some()
    }
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.line_number,
            self.rule_names.join("/"),
            self.rule_description
        )?;

        if let Some(detail) = &self.error_detail {
            write!(f, " [{}]", detail)?;
        }

        if let Some(context) = &self.error_context {
            write!(f, " [Context: \"{}\"]", context)?;
        }

        Ok(())
    }
}

/// Number of UTF-16 units a fix removes
///
/// On the wire this is a plain integer; `-1` means "to end of line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum DeleteCount {
    /// Delete this many units starting at the edit column
    Chars(usize),
    /// Delete from the edit column to the end of the line
    ToEndOfLine,
}

impl Default for DeleteCount {
    fn default() -> Self {
        DeleteCount::Chars(0)
    }
}

impl From<i64> for DeleteCount {
    fn from(value: i64) -> Self {
        if value < 0 {
            DeleteCount::ToEndOfLine
        } else {
            DeleteCount::Chars(value as usize)
        }
    }
}

impl From<DeleteCount> for i64 {
    fn from(value: DeleteCount) -> Self {
        match value {
            DeleteCount::Chars(n) => n as i64,
            DeleteCount::ToEndOfLine => -1,
        }
    }
}

/// Machine-applicable single-line text transformation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixDescriptor {
    /// Line to apply the fix to (defaults to the finding's line if None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,

    /// 1-based column where the edit starts
    #[serde(default = "first_column")]
    pub edit_column: usize,

    /// Units to delete at the edit column
    #[serde(default)]
    pub delete_count: DeleteCount,

    /// Text to insert at the edit column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
}

fn first_column() -> usize {
    1
}

impl Default for FixDescriptor {
    fn default() -> Self {
        Self {
            line_number: None,
            edit_column: 1,
            delete_count: DeleteCount::default(),
            insert_text: None,
        }
    }
}

impl FixDescriptor {
    /// Target line, falling back to the line of the owning finding
    pub fn target_line(&self, finding_line: usize) -> usize {
        match self.line_number {
            Some(line) if line > 0 => line,
            _ => finding_line,
        }
    }

    /// 1-based edit column, with 0 treated as 1
    pub fn column(&self) -> usize {
        self.edit_column.max(1)
    }

    /// Insert text, empty when absent
    pub fn insert(&self) -> &str {
        self.insert_text.as_deref().unwrap_or("")
    }

    /// Whether this fix removes the whole target rather than rewriting it
    pub fn is_range_delete(&self) -> bool {
        self.delete_count == DeleteCount::ToEndOfLine && self.insert().is_empty()
    }
}

/// Shape of the fix attached to a finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fix {
    /// The finding is not machine-fixable
    NoFix,
    /// Rewrite part of one line
    LineReplace {
        /// 1-based target line
        line: usize,
        /// 1-based edit column
        column: usize,
        /// Units removed at `column`
        delete: DeleteCount,
        /// Text inserted at `column`
        insert: String,
    },
    /// Remove the target entirely
    RangeDelete {
        /// 1-based target line
        line: usize,
    },
}

impl Fix {
    /// Classify a descriptor belonging to a finding on `finding_line`
    pub fn from_descriptor(info: &FixDescriptor, finding_line: usize) -> Self {
        let line = info.target_line(finding_line);
        if info.is_range_delete() {
            Fix::RangeDelete { line }
        } else {
            Fix::LineReplace {
                line,
                column: info.column(),
                delete: info.delete_count,
                insert: info.insert().to_string(),
            }
        }
    }
}
