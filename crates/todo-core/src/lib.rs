//! Todo Core
//!
//! Binds the logged-in session to its task lists. Front ends talk to [`App`]
//! only and never touch storage keys directly.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use todo_session::{Account, AccountStore, AuthError, Session};
pub use todo_storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use todo_tasks::{DeletedTask, Progress, Task, TaskError, TaskStore};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
