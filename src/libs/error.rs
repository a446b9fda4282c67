//! Error taxonomy for task store operations.

use crate::libs::messages::Message;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, TaskError>;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Required field missing or malformed. Nothing was written.
    #[error("{0}")]
    Validation(Message),

    /// A single-id operation matched no row.
    #[error("Task #{0} not found")]
    NotFound(i64),

    /// The SQLite store could not be opened, read or written.
    #[error("Task store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
}
