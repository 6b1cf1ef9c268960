//! Host documents as the engine sees them

/// Language id the engine lints
pub const MARKDOWN_LANGUAGE: &str = "markdown";

/// A snapshot of one open document supplied by the editor host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    /// Document identity (a URI for LSP hosts, a path for the CLI)
    pub uri: String,
    /// Declared language id
    pub language_id: String,
    /// Host version, incremented on each change
    pub version: i32,
    /// Current full text
    pub text: String,
}

impl TextDocument {
    /// Create a document snapshot
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        version: i32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            version,
            text: text.into(),
        }
    }

    /// Create a Markdown document snapshot
    pub fn markdown(uri: impl Into<String>, version: i32, text: impl Into<String>) -> Self {
        Self::new(uri, MARKDOWN_LANGUAGE, version, text)
    }

    /// Whether the declared language is Markdown
    pub fn is_markdown(&self) -> bool {
        self.language_id == MARKDOWN_LANGUAGE
    }
}
