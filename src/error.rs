//! Global error handling for packfs
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for packfs operations
#[derive(Error, Debug)]
pub enum PackFsError {
    /// Workspace enumeration failed as a whole
    #[error("Enumeration error: {0}")]
    Enumeration(String),

    /// Workspace root is missing or not a directory
    #[error("Workspace root error: {0}")]
    Root(String),

    /// Selection precondition violated (e.g. empty selection)
    #[error("Selection error: {0}")]
    Selection(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for packfs operations
pub type Result<T> = std::result::Result<T, PackFsError>;

/// Creates a PackFsError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::PackFsError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            PackFsError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// Allow converting PackFsError to io::Error where callers expect io::Result
impl From<PackFsError> for io::Error {
    fn from(err: PackFsError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}
