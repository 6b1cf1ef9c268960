//! `fix`: apply every available fix in place

use super::args::Args;
use super::files::collect_files;
use super::read_document;
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use mdlint_bridge::engine::LintEngine;
use mdlint_bridge::types::TextDocument;
use std::process::ExitCode;

/// Re-lint and re-fix until the text stops changing, at most this many times
const MAX_FIX_PASSES: usize = 10;

/// Fix every file; with `dry_run`, report what would change and exit 1 if anything would
pub(crate) fn run_fix(
    engine: &LintEngine,
    args: &Args,
    paths: &[String],
    dry_run: bool,
) -> Result<ExitCode> {
    let files = collect_files(paths, &args.ignore)?;
    let mut changed = 0;

    for path in &files {
        let document = read_document(path)?;
        let fixed = fix_until_stable(engine, document.clone());
        if fixed == document.text {
            continue;
        }

        changed += 1;
        if dry_run {
            if !args.quiet {
                println!("{} {}", "Would fix:".yellow().bold(), path);
            }
        } else {
            std::fs::write(path, &fixed).with_context(|| format!("cannot write {}", path))?;
            if !args.quiet {
                println!("Fixed: {}", path);
            }
        }
    }

    if !args.quiet {
        match (changed, dry_run) {
            (0, _) => println!("{}", "No fixable issues found.".dimmed()),
            (n, true) => println!(
                "\n{} {} file(s) would be fixed (run without {} to apply).",
                "»".yellow().bold(),
                n.to_string().yellow(),
                "--dry-run".bold()
            ),
            (n, false) => println!("{} file(s) fixed.", n),
        }
    }

    if dry_run && changed > 0 {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

/// Fixed text after repeated fix-all passes
///
/// A fix can expose a new finding (removing blank lines, for example), so
/// passes repeat until one changes nothing.
fn fix_until_stable(engine: &LintEngine, mut document: TextDocument) -> String {
    for pass in 0..MAX_FIX_PASSES {
        let Some(edit) = engine.fix_all(&document) else {
            debug!("{} stable after {} pass(es)", document.uri, pass);
            break;
        };
        document.text = edit.new_text;
        document.version += 1;
    }
    document.text
}
