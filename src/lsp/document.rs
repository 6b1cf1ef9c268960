//! Open documents tracked by the language server

use crate::types::TextDocument;
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;

/// A single open document
#[derive(Debug, Clone)]
pub struct Document {
    /// Document URI
    pub uri: Url,
    /// Language id from `didOpen`
    pub language_id: String,
    /// Full text (full sync)
    pub content: String,
    /// Version reported by the client
    pub version: i32,
}

impl Document {
    /// Create a new document
    pub fn new(uri: Url, language_id: String, content: String, version: i32) -> Self {
        Self {
            uri,
            language_id,
            content,
            version,
        }
    }

    /// Replace the content, returning whether the version moved
    pub fn update(&mut self, content: String, version: i32) -> bool {
        let moved = self.version != version;
        self.content = content;
        self.version = version;
        moved
    }

    /// Snapshot for the lint engine
    pub fn to_text_document(&self) -> TextDocument {
        TextDocument::new(
            self.uri.as_str(),
            self.language_id.as_str(),
            self.version,
            self.content.as_str(),
        )
    }
}

/// Manages all open documents
#[derive(Debug)]
pub struct DocumentManager {
    documents: Arc<DashMap<Url, Document>>,
}

impl DocumentManager {
    /// Create a new document manager
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }

    /// Insert or replace an opened document
    pub fn open(&self, uri: Url, language_id: String, content: String, version: i32) {
        let doc = Document::new(uri.clone(), language_id, content, version);
        self.documents.insert(uri, doc);
    }

    /// Get a document by URI
    pub fn get(&self, uri: &Url) -> Option<Ref<'_, Url, Document>> {
        self.documents.get(uri)
    }

    /// Engine snapshot of a document
    pub fn text_document(&self, uri: &Url) -> Option<TextDocument> {
        self.documents.get(uri).map(|doc| doc.to_text_document())
    }

    /// Update a document's content
    ///
    /// Returns whether the version moved; `false` for unknown documents.
    pub fn update(&self, uri: &Url, content: String, version: i32) -> bool {
        match self.documents.get_mut(uri) {
            Some(mut entry) => entry.update(content, version),
            None => false,
        }
    }

    /// Remove a document
    pub fn remove(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    /// Check if a document exists
    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    /// Get all document URIs
    pub fn all_uris(&self) -> Vec<Url> {
        self.documents
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new()
    }
}
