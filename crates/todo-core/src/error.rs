//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] todo_storage::StorageError),

    #[error("Task error: {0}")]
    Task(#[from] todo_tasks::TaskError),

    #[error("Authentication error: {0}")]
    Auth(#[from] todo_session::AuthError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not logged in")]
    NotAuthenticated,
}

// Implement std::io::Error conversion for fs operations
impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
