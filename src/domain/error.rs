//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while converting between flat lists and trees.
///
/// Structural oddities (duplicate ids, self-references, more than one missing
/// ancestor) are not errors: they degrade to a defined fallback instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// A node claims the path capability but cannot tokenize its path.
    #[error("node {id}: invalid ancestry configuration: {reason}")]
    Configuration { id: String, reason: String },

    #[error("cycle detected in parent chain at node: {0}")]
    CycleDetected(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
