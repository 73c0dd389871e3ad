//! Todo Task Lists
//!
//! Each owner has two ordered lists:
//! - the active list of tasks still being worked on
//! - the deleted list ("trash") of soft-deleted tasks awaiting restore or purge
//!
//! A task id lives in at most one of the two lists at any time. Moving a task
//! between lists never duplicates it.

mod error;
mod progress;
mod store;
mod task;

pub use error::TaskError;
pub use progress::Progress;
pub use store::TaskStore;
pub use task::{DeletedTask, Task};

pub type Result<T> = std::result::Result<T, TaskError>;
