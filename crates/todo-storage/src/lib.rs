//! Todo Storage Layer
//!
//! A flat string key-value namespace. Every collection is stored as a whole
//! JSON document under its key and rewritten in full on each mutation.

mod error;
pub mod keys;
mod memory;
mod migrations;
mod sqlite;
mod store;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{get_json, get_json_or_default, set_json, KeyValueStore, WriteGuard};

pub type Result<T> = std::result::Result<T, StorageError>;
