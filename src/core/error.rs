//! Error types for javast
//!
//! This module provides structured error handling using thiserror.
//!
//! Errors fall into two groups. Path, configuration and output errors abort
//! a run. `Io` and `Ast` errors belong to a single file: the pipeline records
//! them, skips the file and keeps going.

use javast_tree::AstError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for javast operations
pub type Result<T> = std::result::Result<T, DumpError>;

/// Errors that can occur while dumping a source tree
#[derive(Error, Debug)]
pub enum DumpError {
    /// Scan root does not exist
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Scan root exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A file could not be read
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed or serialized (e.g. invalid UTF-8 in a leaf)
    #[error("Failed to serialize {path}: {source}")]
    Ast {
        path: PathBuf,
        #[source]
        source: AstError,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON parsing or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the output sink failed
    #[error("Output error: {0}")]
    Output(#[source] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DumpError>,
    },
}

impl DumpError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DumpError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DumpError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether the scan root itself was unusable
    pub fn is_path_error(&self) -> bool {
        match self {
            DumpError::DirectoryNotFound { .. } | DumpError::NotADirectory { .. } => true,
            DumpError::WithContext { source, .. } => source.is_path_error(),
            _ => false,
        }
    }

    /// Errors confined to a single file; the run can continue past them
    pub fn is_per_file(&self) -> bool {
        match self {
            DumpError::Io { .. } | DumpError::Ast { .. } => true,
            DumpError::WithContext { source, .. } => source.is_per_file(),
            _ => false,
        }
    }

    /// Whether the error came from invalid UTF-8 inside a leaf
    pub fn is_encoding_error(&self) -> bool {
        match self {
            DumpError::Ast { source, .. } => source.is_encoding(),
            DumpError::WithContext { source, .. } => source.is_encoding_error(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
