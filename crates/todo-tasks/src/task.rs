//! Task data structures
//!
//! Field names are serialized in camelCase so lists written by the browser
//! build of the app (`createdAt`, `userId`, `deletedAt`) load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the owner's lists
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Owning account id
    pub user_id: String,
}

impl Task {
    pub fn new(user_id: String, text: &str) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text: normalize_text(text)?,
            completed: false,
            created_at: Utc::now(),
            user_id,
        })
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = normalize_text(text)?;
        Ok(())
    }

    /// Move to the trash, stamped with `deleted_at`.
    pub fn into_deleted(self, deleted_at: DateTime<Utc>) -> DeletedTask {
        DeletedTask {
            task: self,
            deleted_at,
        }
    }
}

/// A task sitting in the trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTask {
    #[serde(flatten)]
    pub task: Task,
    pub deleted_at: DateTime<Utc>,
}

impl DeletedTask {
    pub fn id(&self) -> &str {
        &self.task.id
    }

    /// Strip the deletion stamp.
    pub fn restore(self) -> Task {
        self.task
    }
}

fn normalize_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyText);
    }
    Ok(trimmed.to_string())
}
