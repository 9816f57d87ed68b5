//! Error types for todo operations

use thiserror::Error;

/// Result type for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Errors that can occur during todo operations
#[derive(Debug, Error)]
pub enum TodoError {
    /// Empty task description
    #[error("task description cannot be empty")]
    EmptyTask,

    /// Request was malformed
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// No task at the given 1-based position
    #[error("task not found at position {position}")]
    TaskNotFound { position: usize },

    /// Path segment that should be a position was not a number
    #[error("invalid task position: {value}")]
    InvalidPosition { value: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
