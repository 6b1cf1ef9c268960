//! Language Server Protocol (LSP) host for the lint engine
//!
//! This module provides an LSP server with:
//! - Diagnostics on open/change/save, each toggled by editor settings
//! - Quick fixes, disable comments and a fix-all source action
//! - The `markdownlint.fixAll` command, applied through `workspace/applyEdit`
//! - Configuration reload on `workspace/didChangeConfiguration`
//!
//! # Example
//!
//! ```ignore
//! # use mdlint_bridge::lsp::MdlintLanguageServer;
//! # use tower_lsp::{LspService, Server};
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let stdin = tokio::io::stdin();
//! let stdout = tokio::io::stdout();
//!
//! let (service, socket) = LspService::new(|client| {
//!     MdlintLanguageServer::new(client)
//! });
//!
//! Server::new(stdin, stdout, socket).serve(service).await;
//! # Ok(())
//! # }
//! ```

mod backend;
mod conversion;
mod document;

pub use backend::{MdlintLanguageServer, SERVER_NAME};
pub use document::{Document, DocumentManager};
