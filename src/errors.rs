//! Shared error types for annotation and analysis operations.
//!
//! Every failure surfaces at decoration time. Errors raised by a wrapped
//! function during a call are never wrapped or intercepted, so nothing here
//! models call-time failure.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for decoration-time failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The target function's source text could not be obtained
    #[error("source unavailable: {message}")]
    SourceUnavailable {
        message: String,
        path: Option<PathBuf>,
    },

    /// The extracted source text is not a syntactically valid function
    #[error("parse error{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        message: String,
        line: Option<usize>,
    },

    /// Unrecognized or malformed decoration options
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a source-unavailable error.
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
            path: None,
        }
    }

    /// Create a source-unavailable error with path context.
    pub fn source_unavailable_with_path(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            line: None,
        }
    }

    /// Create a parse error with a 1-based source line.
    pub fn parse_at(message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Get the associated path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::SourceUnavailable { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
