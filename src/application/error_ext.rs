//! Error conversion helpers for I/O and JSON operations
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context (usually the input name) to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// std::fs::read_to_string(&path)
    ///     .with_context("read input", &path.display())?;
    /// ```
    fn with_context(self, action: &str, target: &dyn std::fmt::Display) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context(self, action: &str, target: &dyn std::fmt::Display) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, target),
            source: Box::new(e),
        })
    }
}

/// Extension trait attaching the input name to `serde_json` failures.
pub trait JsonResultExt<T> {
    fn json_context(self, context: &dyn std::fmt::Display) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn json_context(self, context: &dyn std::fmt::Display) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Json {
            context: context.to_string(),
            source,
        })
    }
}
