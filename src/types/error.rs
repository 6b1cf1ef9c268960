//! Error types for mdlint-bridge

use std::path::PathBuf;

/// Main error type for bridge operations
///
/// Every variant is recoverable. Leaf functions return these; the
/// [`LintEngine`](crate::engine::LintEngine) decides what to log and absorb.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A configuration file exists but could not be read
    #[error("Cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A configuration source is malformed
    #[error("Cannot parse config {origin}: {message}")]
    ConfigParse {
        /// Path of the file that failed to parse
        origin: String,
        /// Parser message (last parser tried)
        message: String,
    },

    /// The external lint engine failed
    #[error("Lint engine error: {0}")]
    LintEngine(String),

    /// A fix targets a line the current text no longer has
    #[error("Fix targets line {line} but the document has {line_count} line(s)")]
    StaleLine {
        /// 1-based target line
        line: usize,
        /// Lines present in the current text
        line_count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Whether this error comes from loading configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigRead { .. } | Self::ConfigParse { .. })
    }
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_stale_line() {
        let err = BridgeError::StaleLine {
            line: 7,
            line_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Fix targets line 7 but the document has 3 line(s)"
        );
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_errors_classified() {
        let err = BridgeError::ConfigParse {
            origin: ".markdownlint.json".to_string(),
            message: "expected value".to_string(),
        };
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Cannot parse config .markdownlint.json: expected value"
        );
    }
}
