//! `config`: print the effective configuration

use anyhow::Result;
use mdlint_bridge::engine::LintEngine;
use std::process::ExitCode;

pub(crate) fn print_config(engine: &LintEngine) -> Result<ExitCode> {
    let config = engine
        .snapshot()
        .map(|snapshot| snapshot.config.to_json())
        .unwrap_or_else(|| serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}
