//! mdlint-bridge Language Server Protocol (LSP) server
//!
//! Surfaces markdownlint diagnostics and fixes in any LSP-capable editor.

use mdlint_bridge::lsp::MdlintLanguageServer;
use tower_lsp::{LspService, Server};

#[tokio::main]
async fn main() {
    // Set up logging to stderr (stdout is used for LSP communication)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis()
        .init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(MdlintLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
