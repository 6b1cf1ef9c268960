//! CLI argument definitions for mdlint-bridge

use clap::Parser;
use mdlint_bridge::linter::DEFAULT_COMMAND;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdlint-bridge")]
#[command(about = "Run markdownlint with editor-style configuration and fixes", long_about = None)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// markdownlint executable to run
    #[arg(long, default_value = DEFAULT_COMMAND, global = true)]
    pub(crate) markdownlint: String,

    /// Directory searched for .markdownlint.{json,yaml,yml,toml} (default: current directory)
    #[arg(long, global = true)]
    pub(crate) root: Option<PathBuf>,

    /// Configuration file layered on top of global and project configuration
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Merge nested rule options key by key instead of replacing them
    #[arg(long, global = true)]
    pub(crate) deep_merge: bool,

    /// Glob patterns for files to ignore (repeatable)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub(crate) ignore: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Log configuration and engine activity to stderr
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Quiet mode - only show file names
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,
}

#[derive(Parser, Debug)]
pub(crate) enum Command {
    /// Lint files and print diagnostics
    Check {
        /// Files or directories to lint
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Apply every available fix in place
    Fix {
        /// Files or directories to fix
        #[arg(required = true)]
        files: Vec<String>,

        /// Show what would change without writing any files
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective configuration as JSON
    Config,
}
