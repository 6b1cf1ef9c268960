//! Code actions offered for a selection

use crate::types::{Diagnostic, Position, TextEdit};
use std::fmt;

/// Command that fixes every fixable finding in a document
pub const FIX_ALL_COMMAND: &str = "markdownlint.fixAll";

/// Title of the fix-all action and command
pub const FIX_ALL_TITLE: &str = "Fix All error found by markdownlint";

/// Comment that silences markdownlint for the following line
pub const DISABLE_NEXT_LINE: &str = "<!-- markdownlint-disable-next-line -->";

/// Comment that silences markdownlint for the whole file
pub const DISABLE_FILE: &str = "<!-- markdownlint-disable-file -->";

/// Kind of a code action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Fixes one diagnostic
    QuickFix,
    /// Rewrites the document without fixing anything (disable comments)
    Refactor,
    /// Fixes every fixable diagnostic in the document
    SourceFixAll,
}

impl ActionKind {
    /// LSP code action kind string
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::QuickFix => "quickfix",
            ActionKind::Refactor => "refactor",
            ActionKind::SourceFixAll => "source.fixAll",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action the editor can offer for a selection
///
/// Carries either an edit to apply directly or a command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    /// Label shown in the editor
    pub title: String,
    /// Action category
    pub kind: ActionKind,
    /// Edit applied when the action is chosen
    pub edit: Option<TextEdit>,
    /// Command executed when the action is chosen
    pub command: Option<String>,
    /// Diagnostics the action resolves
    pub diagnostics: Vec<Diagnostic>,
}

impl CodeAction {
    /// `Fix: MD009/no-trailing-spaces` for one diagnostic
    pub fn quick_fix(diagnostic: &Diagnostic, edit: TextEdit) -> Self {
        Self {
            title: format!("Fix: {}", diagnostic.rule_moniker()),
            kind: ActionKind::QuickFix,
            edit: Some(edit),
            command: None,
            diagnostics: vec![diagnostic.clone()],
        }
    }

    /// Insert a disable comment above `line`
    pub fn disable_line(line: u32, line_ending: &str) -> Self {
        Self::insert_comment(
            "Disable markdownlint for current line",
            line,
            DISABLE_NEXT_LINE,
            line_ending,
        )
    }

    /// Insert a disable comment at the top of the document
    pub fn disable_file(line_ending: &str) -> Self {
        Self::insert_comment(
            "Disable markdownlint for current file",
            0,
            DISABLE_FILE,
            line_ending,
        )
    }

    /// Run [`FIX_ALL_COMMAND`] for the fixable `diagnostics`
    pub fn fix_all(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            title: FIX_ALL_TITLE.to_string(),
            kind: ActionKind::SourceFixAll,
            edit: None,
            command: Some(FIX_ALL_COMMAND.to_string()),
            diagnostics,
        }
    }

    fn insert_comment(title: &str, line: u32, comment: &str, line_ending: &str) -> Self {
        let at = Position::new(line, 0);
        Self {
            title: title.to_string(),
            kind: ActionKind::Refactor,
            edit: Some(TextEdit::insert(at, format!("{}{}", comment, line_ending))),
            command: None,
            diagnostics: Vec::new(),
        }
    }
}
