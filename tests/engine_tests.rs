//! Integration tests for the lint engine
//!
//! These drive the public API end to end with a scripted linter standing in
//! for markdownlint.

mod common;

use common::{ScriptedLinter, heading_increment, missing_heading_space, trailing_spaces};
use mdlint_bridge::config::{ConfigResolver, ConfigSource, GlobalRc, RuleMap};
use mdlint_bridge::engine::{ActionKind, FIX_ALL_COMMAND, LintEngine};
use mdlint_bridge::fix::{apply_all_fixes, apply_single_fix};
use mdlint_bridge::types::{DeleteCount, FixDescriptor, LintFinding, Position, Range, TextDocument};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

fn settings(value: Value) -> ConfigSource {
    ConfigSource::Settings(serde_json::from_value::<RuleMap>(value).unwrap())
}

fn engine() -> (LintEngine, Arc<ScriptedLinter>) {
    let linter = Arc::new(ScriptedLinter::new());
    (LintEngine::new(Arc::clone(&linter)), linter)
}

// ---- Configuration ----

#[test]
fn test_settings_beat_project_beat_global() {
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join(".markdownlintrc"),
        r#"{"MD013": {"line_length": 60}, "MD033": false, "MD041": false}"#,
    )
    .unwrap();
    std::fs::write(
        root.path().join(".markdownlint.json"),
        r#"{"MD013": {"line_length": 100}, "MD033": true}"#,
    )
    .unwrap();

    let sources = vec![
        ConfigSource::Global(GlobalRc::new("markdownlint").with_home_dir(home.path())),
        ConfigSource::Project {
            root: root.path().to_path_buf(),
        },
        settings(json!({"MD013": {"line_length": 120}})),
    ];
    let resolved = ConfigResolver::new().resolve(&sources);

    assert!(resolved.failures.is_empty());
    assert_eq!(
        resolved.config.to_json(),
        json!({
            "MD013": {"line_length": 120},
            "MD033": true,
            "MD041": false
        })
    );
}

#[test]
fn test_malformed_project_yields_global_and_settings() {
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join(".markdownlintrc"), r#"{"MD001": false}"#).unwrap();
    std::fs::write(root.path().join(".markdownlint.yaml"), "MD013: [unclosed\n").unwrap();
    // Never reached: the first existing candidate wins even when broken
    std::fs::write(root.path().join(".markdownlint.yml"), "MD024: false\n").unwrap();

    let sources = vec![
        ConfigSource::Global(GlobalRc::new("markdownlint").with_home_dir(home.path())),
        ConfigSource::Project {
            root: root.path().to_path_buf(),
        },
        settings(json!({"MD009": false})),
    ];
    let (engine, linter) = engine();
    let snapshot = engine.configure(&sources);

    assert_eq!(snapshot.config.to_json(), json!({"MD001": false, "MD009": false}));

    engine.lint(&TextDocument::markdown("file:///a.md", 1, "# Title\n"));
    assert_eq!(linter.configs(), vec![json!({"MD001": false, "MD009": false})]);
}

#[test]
fn test_project_extends_parent() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(
        root.path().join("base.yaml"),
        "default: true\nMD013:\n  line_length: 80\nMD033: false\n",
    )
    .unwrap();
    std::fs::write(
        root.path().join(".markdownlint.json"),
        r#"{"extends": "base.yaml", "MD013": {"code_blocks": false}}"#,
    )
    .unwrap();

    let resolved = ConfigResolver::new().resolve(&[ConfigSource::Project {
        root: root.path().to_path_buf(),
    }]);
    assert_eq!(
        resolved.config.to_json(),
        json!({"default": true, "MD013": {"code_blocks": false}, "MD033": false})
    );
}

#[test]
fn test_linter_never_sees_extends() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("shared.json"), r#"{"MD041": false}"#).unwrap();
    std::fs::write(
        home.path().join(".markdownlintrc"),
        r#"{"extends": "shared.json", "MD013": false}"#,
    )
    .unwrap();

    let sources = vec![
        ConfigSource::Global(GlobalRc::new("markdownlint").with_home_dir(home.path())),
        settings(json!({"extends": "markdownlint/style/prettier"})),
    ];
    let (engine, linter) = engine();
    engine.configure(&sources);

    engine.lint(&TextDocument::markdown("file:///a.md", 1, "# Title\n"));
    assert_eq!(linter.configs(), vec![json!({"MD013": false, "MD041": false})]);
}

#[test]
fn test_disabled_rule_is_not_reported() {
    let (engine, _) = engine();
    engine.configure(&[settings(json!({"MD009": false}))]);

    let diagnostics = engine
        .lint(&TextDocument::markdown("file:///a.md", 1, "#Title\n\nText   \n"))
        .unwrap();
    let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.code.clone()).collect();
    assert_eq!(codes, vec!["MD018".to_string()]);
}

// ---- Diagnostics ----

#[test]
fn test_lint_is_repeatable() {
    let (engine, _) = engine();
    engine.configure(&[]);
    let document = TextDocument::markdown("file:///a.md", 3, "#Title\n\nSome text  \n\n\n");

    let first = engine.lint(&document).unwrap();
    let second = engine.lint(&document).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_diagnostic_positions_and_messages() {
    let (engine, _) = engine();
    let diagnostics = engine
        .lint(&TextDocument::markdown("file:///a.md", 1, "# Title\n\nnaïve text   \n"))
        .unwrap();

    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(
        diagnostic.range,
        Range::new(Position::new(2, 10), Position::new(2, 13))
    );
    assert_eq!(
        diagnostic.message,
        "MD009/no-trailing-spaces: Trailing spaces [Expected: 0 or 2; Actual: 3]"
    );
    assert_eq!(diagnostic.source, "markdownlint");
}

// ---- Fixes ----

fn line_fix(line: usize, column: usize, delete: usize, insert: &str) -> LintFinding {
    LintFinding {
        line_number: line,
        rule_names: vec!["MD000".to_string()],
        rule_description: "Test".to_string(),
        fix_info: Some(FixDescriptor {
            edit_column: column,
            delete_count: DeleteCount::Chars(delete),
            insert_text: Some(insert.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn test_batch_equals_bottom_up_sequence() {
    let text = "one\ntwo\nthree\nfour\nfive";
    let line2 = line_fix(2, 1, 3, "TWO");
    let line4 = line_fix(4, 5, 0, "!");

    let batch = apply_all_fixes(text, &[line2.clone(), line4.clone()]);
    let sequential = apply_all_fixes(&apply_all_fixes(text, &[line4]), &[line2]);

    assert_eq!(batch, "one\nTWO\nthree\nfour!\nfive");
    assert_eq!(batch, sequential);
}

#[test]
fn test_no_fix_info_leaves_text_unchanged() {
    let text = "# Title\r\n\r\n### Deep\r\n";
    assert_eq!(apply_all_fixes(text, &[heading_increment(3)]), text);
}

#[test]
fn test_delete_to_end_without_insert_is_range_delete() {
    let fix = FixDescriptor {
        edit_column: 4,
        delete_count: DeleteCount::ToEndOfLine,
        ..Default::default()
    };
    for line in ["", "abc", "some longer line"] {
        assert_eq!(apply_single_fix(line, &fix), None);
    }
}

#[test]
fn test_fix_all_converges_with_blank_lines() {
    let (engine, _) = engine();
    let document = TextDocument::markdown("file:///a.md", 1, "#Title\n\n\n\nText  \n");

    let edit = engine.fix_all(&document).unwrap();
    assert_eq!(edit.new_text, "# Title\n\nText\n");
    assert_eq!(
        edit.range,
        Range::new(Position::new(0, 0), Position::new(5, 0))
    );

    let fixed = TextDocument::markdown("file:///a.md", 2, edit.new_text);
    assert_eq!(engine.fix_all(&fixed), None);
}

#[test]
fn test_fix_all_keeps_crlf() {
    let (engine, _) = engine();
    let document = TextDocument::markdown("file:///a.md", 1, "##Title\r\nText \r\n");
    let edit = engine.fix_all(&document).unwrap();
    assert_eq!(edit.new_text, "## Title\r\nText\r\n");
}

// ---- Code actions ----

#[test]
fn test_code_actions_on_fixable_line() {
    let (engine, _) = engine();
    let document = TextDocument::markdown("file:///a.md", 4, "#Title\n\nText   \n");
    engine.lint(&document);

    let actions = engine.code_actions(&document, Range::point(Position::new(0, 0)));
    let summary: Vec<(&str, ActionKind)> =
        actions.iter().map(|a| (a.title.as_str(), a.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("Fix: MD018/no-missing-space-atx", ActionKind::QuickFix),
            ("Disable markdownlint for current line", ActionKind::Refactor),
            ("Fix All error found by markdownlint", ActionKind::SourceFixAll),
        ]
    );

    let edit = actions[0].edit.as_ref().unwrap();
    assert_eq!(edit.new_text, "# Title");
    assert_eq!(edit.range, Range::new(Position::new(0, 0), Position::new(0, 6)));
    assert_eq!(actions[2].command.as_deref(), Some(FIX_ALL_COMMAND));
    assert_eq!(actions[2].diagnostics.len(), 1);
}

#[test]
fn test_code_actions_range_delete_widens_blank_line() {
    let (engine, _) = engine();
    let document = TextDocument::markdown("file:///a.md", 1, "# Title\n\n\nText\n");
    engine.lint(&document);

    let actions = engine.code_actions(&document, Range::point(Position::new(2, 0)));
    let edit = actions[0].edit.as_ref().unwrap();
    assert_eq!(actions[0].title, "Fix: MD012/no-multiple-blanks");
    assert_eq!(edit.range, Range::new(Position::new(2, 0), Position::new(3, 0)));
    assert_eq!(edit.new_text, "");
}

#[test]
fn test_code_actions_whole_document_offers_fix_all_only() {
    let (engine, _) = engine();
    let text = "#Title\n\nText   \n";
    let document = TextDocument::markdown("file:///a.md", 1, text);
    engine.lint(&document);

    let whole = Range::new(Position::new(0, 0), Position::new(3, 0));
    let actions = engine.code_actions(&document, whole);
    let titles: Vec<&str> = actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Disable markdownlint for current file",
            "Fix All error found by markdownlint",
        ]
    );
    assert_eq!(actions[1].diagnostics.len(), 2);
}

#[test]
fn test_code_actions_require_matching_version() {
    let (engine, _) = engine();
    engine.lint(&TextDocument::markdown("file:///a.md", 1, "#Title\n"));

    let edited = TextDocument::markdown("file:///a.md", 2, "#Title\n");
    let selection = Range::new(Position::new(0, 2), Position::new(0, 4));
    assert!(engine.code_actions(&edited, selection).is_empty());
}

#[test]
fn test_close_forgets_document() {
    let (engine, _) = engine();
    let document = TextDocument::markdown("file:///a.md", 1, "#Title\n");
    engine.lint(&document);
    engine.close("file:///a.md");

    assert!(engine.published("file:///a.md").is_none());
    let selection = Range::new(Position::new(0, 1), Position::new(0, 2));
    assert!(engine.code_actions(&document, selection).is_empty());
}

#[test]
fn test_scripted_rules() {
    assert!(trailing_spaces(1, "text").is_none());
    assert!(trailing_spaces(1, "   ").is_none());
    assert!(missing_heading_space(1, "# ok").is_none());
    assert!(missing_heading_space(1, "#######no").is_none());
    assert_eq!(missing_heading_space(2, "##x").unwrap().error_range, Some((1, 3)));
}
