//! Conversions between engine types and `lsp_types`

use crate::engine::{ActionKind, CodeAction};
use crate::types::{self, Severity};
use serde_json::Value;
use std::collections::HashMap;
use tower_lsp::lsp_types::{
    self as lsp, CodeActionKind, CodeActionOrCommand, Command, DiagnosticSeverity,
    NumberOrString, Url, WorkspaceEdit,
};

pub fn to_position(position: types::Position) -> lsp::Position {
    lsp::Position {
        line: position.line,
        character: position.character,
    }
}

pub fn from_position(position: lsp::Position) -> types::Position {
    types::Position::new(position.line, position.character)
}

pub fn to_range(range: types::Range) -> lsp::Range {
    lsp::Range {
        start: to_position(range.start),
        end: to_position(range.end),
    }
}

pub fn from_range(range: lsp::Range) -> types::Range {
    types::Range::new(from_position(range.start), from_position(range.end))
}

fn severity_to_lsp(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Warning => DiagnosticSeverity::WARNING,
    }
}

/// Convert an engine diagnostic to an LSP diagnostic
pub fn to_diagnostic(diagnostic: &types::Diagnostic) -> lsp::Diagnostic {
    lsp::Diagnostic {
        range: to_range(diagnostic.range),
        severity: Some(severity_to_lsp(diagnostic.severity)),
        code: diagnostic.code.clone().map(NumberOrString::String),
        source: Some(diagnostic.source.clone()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

pub fn to_text_edit(edit: &types::TextEdit) -> lsp::TextEdit {
    lsp::TextEdit {
        range: to_range(edit.range),
        new_text: edit.new_text.clone(),
    }
}

/// Workspace edit applying `edit` to one document
pub fn to_workspace_edit(uri: &Url, edit: &types::TextEdit) -> WorkspaceEdit {
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), vec![to_text_edit(edit)]);
    WorkspaceEdit {
        changes: Some(changes),
        ..Default::default()
    }
}

fn action_kind(kind: ActionKind) -> CodeActionKind {
    match kind {
        ActionKind::QuickFix => CodeActionKind::QUICKFIX,
        ActionKind::Refactor => CodeActionKind::REFACTOR,
        ActionKind::SourceFixAll => CodeActionKind::SOURCE_FIX_ALL,
    }
}

/// Convert an engine code action for the document at `uri`
///
/// Command actions carry the document URI as their only argument.
pub fn to_code_action(uri: &Url, action: &CodeAction) -> CodeActionOrCommand {
    CodeActionOrCommand::CodeAction(lsp::CodeAction {
        title: action.title.clone(),
        kind: Some(action_kind(action.kind)),
        diagnostics: Some(action.diagnostics.iter().map(to_diagnostic).collect()),
        edit: action.edit.as_ref().map(|edit| to_workspace_edit(uri, edit)),
        command: action.command.as_ref().map(|command| Command {
            title: action.title.clone(),
            command: command.clone(),
            arguments: Some(vec![Value::String(uri.to_string())]),
        }),
        is_preferred: Some(action.kind == ActionKind::QuickFix),
        ..Default::default()
    })
}

/// Document URI passed to a command, either a string or `{ "uri": ... }`
pub fn command_uri(arguments: &[Value]) -> Option<Url> {
    let first = arguments.first()?;
    let raw = first
        .as_str()
        .or_else(|| first.get("uri").and_then(Value::as_str))?;
    Url::parse(raw).ok()
}
