//! LSP backend implementation
//!
//! This module provides the main Language Server implementation.

use super::conversion::{command_uri, from_range, to_code_action, to_diagnostic, to_workspace_edit};
use super::document::DocumentManager;
use crate::config::EditorSettings;
use crate::engine::{FIX_ALL_COMMAND, LintEngine};
use crate::linter::{DEFAULT_COMMAND, Linter, MarkdownlintCli};
use log::{info, warn};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// Server name reported to clients
pub const SERVER_NAME: &str = "mdlint-bridge";

/// The markdownlint bridge language server
#[derive(Clone)]
pub struct MdlintLanguageServer {
    client: Client,
    engine: Arc<LintEngine>,
    document_manager: Arc<DocumentManager>,
    settings: Arc<RwLock<EditorSettings>>,
    root: Arc<RwLock<Option<PathBuf>>>,
    fixed_linter: bool,
}

impl MdlintLanguageServer {
    /// Create a server driving the `markdownlint` CLI
    ///
    /// The `command` setting picks the executable.
    pub fn new(client: Client) -> Self {
        Self::build(client, LintEngine::default(), false)
    }

    /// Create a server driving `linter`, ignoring the `command` setting
    pub fn with_linter(client: Client, linter: impl Linter + 'static) -> Self {
        Self::build(client, LintEngine::new(linter), true)
    }

    fn build(client: Client, engine: LintEngine, fixed_linter: bool) -> Self {
        Self {
            client,
            engine: Arc::new(engine),
            document_manager: Arc::new(DocumentManager::new()),
            settings: Arc::new(RwLock::new(EditorSettings::default())),
            root: Arc::new(RwLock::new(None)),
            fixed_linter,
        }
    }

    /// The engine behind this server
    pub fn engine(&self) -> &LintEngine {
        &self.engine
    }

    fn settings(&self) -> EditorSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read a settings payload, keeping the current settings when it is invalid
    async fn apply_settings(&self, value: &Value) {
        let settings = match EditorSettings::from_value(value) {
            Ok(settings) => settings,
            Err(e) => {
                self.client
                    .log_message(MessageType::WARNING, format!("Invalid settings: {}", e))
                    .await;
                return;
            }
        };

        self.engine.set_merge_strategy(settings.merge_strategy);
        if !self.fixed_linter {
            let command = settings.command.as_deref().unwrap_or(DEFAULT_COMMAND);
            self.engine.set_linter(MarkdownlintCli::new(command));
        }
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// Resolve configuration from every source and swap it in
    fn reconfigure(&self) {
        let root = self
            .root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let sources = self.settings().sources(root.as_deref());
        let snapshot = self.engine.reload(&sources);
        info!("Configuration version {}", snapshot.version);
    }

    /// Lint a document and publish diagnostics
    async fn lint_and_publish(&self, uri: Url) {
        let Some(document) = self.document_manager.text_document(&uri) else {
            return;
        };

        if let Some(diagnostics) = self.engine.lint(&document) {
            let diagnostics = diagnostics.iter().map(to_diagnostic).collect();
            self.client
                .publish_diagnostics(uri, diagnostics, Some(document.version))
                .await;
        }
    }

    async fn fix_all(&self, uri: Url) {
        let Some(document) = self.document_manager.text_document(&uri) else {
            warn!("{} is not open", uri);
            return;
        };
        let Some(edit) = self.engine.fix_all(&document) else {
            return;
        };

        match self.client.apply_edit(to_workspace_edit(&uri, &edit)).await {
            Ok(response) if !response.applied => {
                let reason = response.failure_reason.unwrap_or_default();
                warn!("Client rejected fixes for {}: {}", uri, reason);
            }
            Ok(_) => {}
            Err(e) => warn!("Applying fixes to {} failed: {}", uri, e),
        }
    }
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
        return folder.uri.to_file_path().ok();
    }
    params.root_uri.as_ref().and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for MdlintLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.client
            .log_message(MessageType::INFO, "mdlint-bridge LSP server initializing")
            .await;

        if let Some(options) = &params.initialization_options {
            self.apply_settings(options).await;
        }
        *self.root.write().unwrap_or_else(PoisonError::into_inner) = workspace_root(&params);
        self.reconfigure();

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                        ..Default::default()
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![
                            CodeActionKind::QUICKFIX,
                            CodeActionKind::REFACTOR,
                            CodeActionKind::SOURCE_FIX_ALL,
                        ]),
                        ..Default::default()
                    },
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![FIX_ALL_COMMAND.to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "mdlint-bridge LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.client
            .log_message(MessageType::INFO, "mdlint-bridge LSP server shutting down")
            .await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        let uri = item.uri.clone();
        self.document_manager
            .open(item.uri, item.language_id, item.text, item.version);

        if self.settings().on_open {
            self.lint_and_publish(uri).await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change holds the whole text
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let moved = self.document_manager.update(&uri, change.text, version);

        if moved && self.settings().on_change {
            self.lint_and_publish(uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if self.settings().on_save {
            self.lint_and_publish(params.text_document.uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.document_manager.remove(&uri);
        self.engine.close(uri.as_str());

        // Clear diagnostics
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if !params.settings.is_null() {
            self.apply_settings(&params.settings).await;
        }
        self.reconfigure();

        for uri in self.document_manager.all_uris() {
            self.lint_and_publish(uri).await;
        }
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;
        let Some(document) = self.document_manager.text_document(&uri) else {
            return Ok(None);
        };

        let actions: CodeActionResponse = self
            .engine
            .code_actions(&document, from_range(params.range))
            .iter()
            .map(|action| to_code_action(&uri, action))
            .collect();

        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != FIX_ALL_COMMAND {
            return Err(Error::invalid_params(format!(
                "unknown command: {}",
                params.command
            )));
        }
        let Some(uri) = command_uri(&params.arguments) else {
            return Err(Error::invalid_params("expected a document URI argument"));
        };

        self.fix_all(uri).await;
        Ok(None)
    }
}
