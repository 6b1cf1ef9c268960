//! `check`: lint files and print diagnostics

use super::args::Args;
use super::files::collect_files;
use super::read_document;
use anyhow::Result;
use colored::Colorize;
use log::error;
use mdlint_bridge::engine::LintEngine;
use mdlint_bridge::types::Diagnostic;
use std::process::ExitCode;

/// Lint every file
///
/// Exits with 2 when the engine failed on any file, otherwise with 1 when
/// anything was reported.
pub(crate) fn run_check(engine: &LintEngine, args: &Args, paths: &[String]) -> Result<ExitCode> {
    let files = collect_files(paths, &args.ignore)?;
    if files.is_empty() {
        if !args.quiet {
            println!("No files to lint.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut total = 0;
    let mut fixable = 0;
    let mut files_with_findings = 0;
    let mut failed = 0;

    for path in &files {
        let document = read_document(path)?;
        let diagnostics = match engine.try_lint(&document) {
            Ok(diagnostics) => diagnostics.unwrap_or_default(),
            Err(e) => {
                error!("Linting {} failed: {}", path, e);
                failed += 1;
                continue;
            }
        };
        if diagnostics.is_empty() {
            continue;
        }

        files_with_findings += 1;
        total += diagnostics.len();
        if let Some(published) = engine.published(&document.uri) {
            fixable += published.findings.iter().filter(|f| f.is_fixable()).count();
        }

        if args.quiet {
            println!("{}", path);
        } else {
            for diagnostic in &diagnostics {
                println!("{}", format_diagnostic(path, diagnostic));
            }
        }
    }

    if failed > 0 {
        eprintln!("{} file(s) could not be linted", failed);
        return Ok(ExitCode::from(2));
    }

    if total == 0 {
        if !args.quiet {
            println!("No errors found!");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !args.quiet {
        println!(
            "\n{} {} problem(s) in {} file(s), {} fixable with {}",
            "✖".red().bold(),
            total.to_string().red(),
            files_with_findings,
            fixable.to_string().yellow(),
            "mdlint-bridge fix".bold()
        );
    }
    Ok(ExitCode::from(1))
}

/// `README.md:3:10 MD009/no-trailing-spaces: Trailing spaces`
fn format_diagnostic(path: &str, diagnostic: &Diagnostic) -> String {
    let location = format!(
        "{}:{}:{}",
        path,
        diagnostic.range.start.line + 1,
        diagnostic.range.start.character + 1
    );
    let (moniker, rest) = diagnostic
        .message
        .split_once(": ")
        .unwrap_or((diagnostic.message.as_str(), ""));
    format!("{} {}: {}", location.bold(), moniker.yellow(), rest)
}
