//! Convert lint findings to editor diagnostics

use crate::types::{Diagnostic, FindingId, LintFinding, Position, Range, SOURCE, Severity};

/// Map the findings for one document, preserving order
///
/// Each diagnostic's [`FindingId`] is the index of its finding in `findings`.
pub fn map_findings(findings: &[LintFinding]) -> Vec<Diagnostic> {
    findings
        .iter()
        .enumerate()
        .map(|(idx, finding)| finding_to_diagnostic(FindingId(idx), finding))
        .collect()
}

/// Convert one finding to a diagnostic
pub fn finding_to_diagnostic(origin: FindingId, finding: &LintFinding) -> Diagnostic {
    Diagnostic {
        range: finding_range(finding),
        severity: Severity::Warning,
        code: finding.rule_names.first().cloned(),
        source: SOURCE.to_string(),
        message: format_message(finding),
        origin,
    }
}

/// Range for a finding: its exact span when the engine gives one, otherwise a
/// zero-width anchor at the start of the line
pub fn finding_range(finding: &LintFinding) -> Range {
    let line = to_u32(finding.line_number.saturating_sub(1));
    match finding.error_range {
        Some((start_column, length)) => {
            let start = to_u32(start_column.saturating_sub(1));
            Range::new(
                Position::new(line, start),
                Position::new(line, start.saturating_add(to_u32(length))),
            )
        }
        None => Range::point(Position::new(line, 0)),
    }
}

/// Clamp an engine-reported number to a position component
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// `MD009/no-trailing-spaces: Trailing spaces [Expected: 0; Actual: 3]`
pub fn format_message(finding: &LintFinding) -> String {
    let mut message = format!(
        "{}: {}",
        finding.rule_names.join("/"),
        finding.rule_description
    );

    if let Some(detail) = &finding.error_detail {
        message.push_str(&format!(" [{}]", detail));
    }

    message
}
