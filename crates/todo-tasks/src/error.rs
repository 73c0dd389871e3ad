//! Task error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task text cannot be empty")]
    EmptyText,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] todo_storage::StorageError),
}
