//! Apply fix descriptors to line or document text

use crate::helpers::{end_position, preferred_line_ending, splice_utf16, split_lines, utf16_len};
use crate::types::{
    BridgeError, DeleteCount, Diagnostic, Fix, FixDescriptor, LintFinding, Position, Range,
    Result, TextEdit,
};
use log::debug;

/// Apply one fix to the text of its target line
///
/// Returns `None` when the fix removes its target outright (delete to end of
/// line with nothing inserted). The caller then deletes the diagnostic's
/// range instead of replacing the line.
///
/// # Examples
/// ```
/// use mdlint_bridge::fix::apply_single_fix;
/// use mdlint_bridge::types::{DeleteCount, FixDescriptor};
///
/// let fix = FixDescriptor {
///     edit_column: 6,
///     delete_count: DeleteCount::Chars(3),
///     ..Default::default()
/// };
/// assert_eq!(apply_single_fix("hello   ", &fix).as_deref(), Some("hello"));
/// ```
pub fn apply_single_fix(current_line: &str, fix: &FixDescriptor) -> Option<String> {
    if fix.is_range_delete() {
        return None;
    }

    let delete = match fix.delete_count {
        DeleteCount::Chars(count) => Some(count),
        DeleteCount::ToEndOfLine => None,
    };
    Some(splice_utf16(
        current_line,
        fix.column() - 1,
        delete,
        fix.insert(),
    ))
}

/// Edit that applies one diagnostic's fix to the current text
///
/// The target line is the fix's own line number, or the diagnostic's line.
/// Fails with [`BridgeError::StaleLine`] when the text no longer has that
/// line.
pub fn single_fix_edit(text: &str, diagnostic: &Diagnostic, fix: &FixDescriptor) -> Result<TextEdit> {
    let lines = split_lines(text);
    let target = fix.target_line(diagnostic.range.start.line as usize + 1);
    let idx = target
        .checked_sub(1)
        .filter(|idx| *idx < lines.len())
        .ok_or(BridgeError::StaleLine {
            line: target,
            line_count: lines.len(),
        })?;

    let line = lines[idx];
    match apply_single_fix(line, fix) {
        Some(new_line) => {
            let range = Range::new(
                Position::new(idx as u32, 0),
                Position::new(idx as u32, utf16_len(line) as u32),
            );
            Ok(TextEdit::replace(range, new_line))
        }
        None => Ok(TextEdit::delete(delete_range(diagnostic.range, idx, &lines))),
    }
}

/// Span removed by a range-delete fix
///
/// A non-empty diagnostic span on the target line is used as is. A zero-width
/// span widens to the whole target line including one line break.
fn delete_range(span: Range, idx: usize, lines: &[&str]) -> Range {
    if !span.is_empty() && span.start.line as usize == idx && span.end.line as usize == idx {
        return span;
    }

    let line = idx as u32;
    if idx + 1 < lines.len() {
        Range::new(Position::new(line, 0), Position::new(line + 1, 0))
    } else if idx > 0 {
        let previous = utf16_len(lines[idx - 1]) as u32;
        Range::new(
            Position::new(line - 1, previous),
            Position::new(line, utf16_len(lines[idx]) as u32),
        )
    } else {
        Range::new(Position::new(0, 0), Position::new(0, utf16_len(lines[0]) as u32))
    }
}

/// A fix with its target resolved, ready for batch application
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingFix {
    line: usize,
    column: usize,
    delete: DeleteCount,
    insert: String,
    deletes_line: bool,
    dropped: bool,
}

impl PendingFix {
    fn from_finding(finding: &LintFinding) -> Option<Self> {
        match finding.fix() {
            Fix::NoFix => None,
            Fix::LineReplace {
                line,
                column,
                delete,
                insert,
            } => Some(Self {
                line,
                column,
                delete,
                insert,
                deletes_line: false,
                dropped: false,
            }),
            Fix::RangeDelete { line } => Some(Self {
                line,
                column: 1,
                delete: DeleteCount::ToEndOfLine,
                insert: String::new(),
                deletes_line: true,
                dropped: false,
            }),
        }
    }

    fn same_edit(&self, other: &Self) -> bool {
        self.line == other.line
            && self.column == other.column
            && self.delete == other.delete
            && self.insert == other.insert
    }
}

/// Apply every fix in `findings` to `text` in one pass
///
/// All fixes refer to line numbers of the same snapshot, so they are applied
/// bottom-to-top: an edit never shifts a line that a later edit targets.
/// Within a line edits go right-to-left and whole-line deletions go last.
/// Exact duplicates apply once, an insert and a delete at the same spot merge
/// into one replacement, and an edit overlapping one already applied on the
/// same line is skipped. Findings without fix info are ignored; with none
/// left the input comes back unchanged.
pub fn apply_all_fixes(text: &str, findings: &[LintFinding]) -> String {
    let mut fixes: Vec<PendingFix> = findings.iter().filter_map(PendingFix::from_finding).collect();
    if fixes.is_empty() {
        return text.to_string();
    }

    let line_ending = preferred_line_ending(text);
    let mut lines: Vec<Option<String>> = split_lines(text)
        .into_iter()
        .map(|line| Some(line.to_string()))
        .collect();

    // Bottom-to-top, line deletions last, right-to-left, long inserts first
    fixes.sort_by(|a, b| {
        b.line
            .cmp(&a.line)
            .then(a.deletes_line.cmp(&b.deletes_line))
            .then(b.column.cmp(&a.column))
            .then(utf16_len(&b.insert).cmp(&utf16_len(&a.insert)))
    });
    fixes.dedup_by(|current, previous| current.same_edit(previous));

    // An insert-only fix followed by a delete-only fix at the same spot
    // becomes one replacement
    for i in 1..fixes.len() {
        let (head, tail) = fixes.split_at_mut(i);
        let (previous, current) = (&mut head[i - 1], &mut tail[0]);
        if !previous.dropped
            && previous.line == current.line
            && previous.column == current.column
            && current.insert.is_empty()
            && matches!(current.delete, DeleteCount::Chars(n) if n > 0)
            && !previous.insert.is_empty()
            && previous.delete == DeleteCount::Chars(0)
        {
            current.insert = std::mem::take(&mut previous.insert);
            previous.dropped = true;
        }
    }

    let mut last_line: Option<usize> = None;
    let mut last_edit: isize = -1;
    for fix in fixes.iter().filter(|fix| !fix.dropped) {
        let Some(line_idx) = fix.line.checked_sub(1) else {
            continue;
        };
        let edit_idx = fix.column - 1;

        let Some(Some(line)) = lines.get(line_idx) else {
            debug!("Skipping fix for line {}: not in document", fix.line);
            continue;
        };

        let delete = match fix.delete {
            DeleteCount::Chars(n) => n,
            DeleteCount::ToEndOfLine => utf16_len(line).saturating_sub(edit_idx),
        };
        let slack = if delete > 0 { 0 } else { 1 };
        let applies = last_line != Some(line_idx)
            || fix.deletes_line
            || (edit_idx + delete) as isize <= last_edit - slack;

        if applies {
            lines[line_idx] = if fix.deletes_line {
                None
            } else {
                let insert = fix.insert.replace('\n', line_ending);
                let delete = match fix.delete {
                    DeleteCount::Chars(n) => Some(n),
                    DeleteCount::ToEndOfLine => None,
                };
                Some(splice_utf16(line, edit_idx, delete, &insert))
            };
        }

        last_line = Some(line_idx);
        last_edit = edit_idx as isize;
    }

    lines.into_iter().flatten().collect::<Vec<_>>().join(line_ending)
}

/// Whole-document replacement turning `original` into `fixed`
///
/// `None` when the texts are equal, so no-op fixes never reach the editor.
pub fn replace_document_edit(original: &str, fixed: &str) -> Option<TextEdit> {
    if original == fixed {
        return None;
    }
    let range = Range::new(Position::new(0, 0), end_position(original));
    Some(TextEdit::replace(range, fixed))
}
