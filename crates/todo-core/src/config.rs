//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides the platform data directory when set.
pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            database_path: data_dir.as_ref().join("todo.db"),
        }
    }

    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("todo"))
            .unwrap_or_else(|| PathBuf::from(".todo"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
