//! Authentication error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] todo_storage::StorageError),
}
