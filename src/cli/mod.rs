//! CLI entry point: module declarations and the `run()` dispatcher

mod args;
mod check;
mod config;
mod files;
mod fix;

use anyhow::{Context, Result};
use args::{Args, Command};
use clap::Parser;
use mdlint_bridge::config::{
    ConfigSource, GlobalRc, MergeStrategy, SETTINGS_SECTION, read_config_file,
};
use mdlint_bridge::engine::LintEngine;
use mdlint_bridge::linter::MarkdownlintCli;
use mdlint_bridge::types::TextDocument;
use std::process::ExitCode;

/// Main CLI entry point: parse args and dispatch to the appropriate handler
pub fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis()
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let engine = build_engine(&args)?;

    match &args.command {
        Command::Check { files } => check::run_check(&engine, &args, files),
        Command::Fix { files, dry_run } => fix::run_fix(&engine, &args, files, *dry_run),
        Command::Config => config::print_config(&engine),
    }
}

/// Engine configured from global, project and `--config` sources
fn build_engine(args: &Args) -> Result<LintEngine> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    let mut sources = vec![
        ConfigSource::Global(GlobalRc::discover(SETTINGS_SECTION).with_start_dir(&root)),
        ConfigSource::Project { root },
    ];
    if let Some(path) = &args.config {
        let rules = read_config_file(path)
            .with_context(|| format!("cannot load {}", path.display()))?;
        sources.push(ConfigSource::Settings(rules));
    }

    let engine = LintEngine::new(MarkdownlintCli::new(args.markdownlint.as_str()));
    if args.deep_merge {
        engine.set_merge_strategy(MergeStrategy::Deep);
    }
    engine.configure(&sources);
    Ok(engine)
}

/// Read a file as a Markdown document for the engine
fn read_document(path: &str) -> Result<TextDocument> {
    let text = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?;
    Ok(TextDocument::markdown(path, 0, text))
}
