//! Error types for the collaborators around the analysis engine.
//!
//! The engine itself (graph traversal, scoring, classification) never fails:
//! missing nodes, empty inputs and cycles all have defined results. Errors only
//! come from the edges of the system: reading configuration, walking the source
//! tree, and structured export extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for contextmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Export extraction failed for a single file
    #[error("Parse error in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Directory traversal errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),

    /// Wrapped collaborator errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error for a file
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the error came from a missing file rather than bad content.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileSystem {
                source: Some(source),
                ..
            } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Io(source) => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
