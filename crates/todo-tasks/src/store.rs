//! Task Store
//!
//! Reads an owner's list, mutates it in memory, and writes the whole list
//! back. Mutations hold the backend's writer lock, which every handle onto
//! that backend shares, so concurrent callers cannot interleave a
//! read-modify-write.
//!
//! An id that is not present is never an error: the operation writes nothing
//! and reports the absence as `None` (or a zero count).

use chrono::Utc;

use todo_storage::{get_json_or_default, keys, set_json, KeyValueStore};

use crate::progress::Progress;
use crate::task::{DeletedTask, Task};
use crate::Result;

pub struct TaskStore<S> {
    store: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Active tasks of `owner`, oldest first.
    pub fn list_active(&self, owner: &str) -> Result<Vec<Task>> {
        Ok(get_json_or_default(&self.store, &keys::todos(owner))?)
    }

    /// Trashed tasks of `owner`, in deletion order.
    pub fn list_deleted(&self, owner: &str) -> Result<Vec<DeletedTask>> {
        Ok(get_json_or_default(&self.store, &keys::deleted_todos(owner))?)
    }

    /// Every owner that has an active list stored, even an empty one.
    pub fn owners(&self) -> Result<Vec<String>> {
        let stored = self.store.keys_with_prefix(&keys::todos(""))?;
        Ok(stored
            .iter()
            .filter_map(|key| keys::owner_of_todos(key))
            .map(str::to_string)
            .collect())
    }

    pub fn progress(&self, owner: &str) -> Result<Progress> {
        Ok(Progress::of(&self.list_active(owner)?))
    }

    /// Append a new task to the active list.
    pub fn create(&self, owner: &str, text: &str) -> Result<Task> {
        let task = Task::new(owner.to_string(), text)?;

        let _guard = self.store.write_guard();
        let mut active = self.list_active(owner)?;
        active.push(task.clone());
        self.save_active(owner, &active)?;

        tracing::info!(owner = %owner, task_id = %task.id, "Created task");

        Ok(task)
    }

    /// Flip the completion flag.
    pub fn toggle(&self, owner: &str, id: &str) -> Result<Option<Task>> {
        let _guard = self.store.write_guard();
        let mut active = self.list_active(owner)?;

        let Some(task) = active.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(owner = %owner, task_id = %id, "Toggle skipped, task not found");
            return Ok(None);
        };
        task.toggle();
        let task = task.clone();

        self.save_active(owner, &active)?;
        tracing::info!(owner = %owner, task_id = %id, completed = task.completed, "Toggled task");

        Ok(Some(task))
    }

    /// Replace the text of an active task.
    pub fn edit(&self, owner: &str, id: &str, text: &str) -> Result<Option<Task>> {
        let _guard = self.store.write_guard();
        let mut active = self.list_active(owner)?;

        let Some(task) = active.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(owner = %owner, task_id = %id, "Edit skipped, task not found");
            return Ok(None);
        };
        task.set_text(text)?;
        let task = task.clone();

        self.save_active(owner, &active)?;
        tracing::info!(owner = %owner, task_id = %id, "Edited task");

        Ok(Some(task))
    }

    /// Move an active task to the trash.
    pub fn soft_delete(&self, owner: &str, id: &str) -> Result<Option<DeletedTask>> {
        let _guard = self.store.write_guard();
        let mut active = self.list_active(owner)?;

        let Some(index) = active.iter().position(|t| t.id == id) else {
            tracing::debug!(owner = %owner, task_id = %id, "Delete skipped, task not found");
            return Ok(None);
        };
        let deleted_task = active.remove(index).into_deleted(Utc::now());

        let mut deleted = self.list_deleted(owner)?;
        deleted.push(deleted_task.clone());
        self.save_both(owner, &active, &deleted)?;

        tracing::info!(owner = %owner, task_id = %id, "Moved task to trash");

        Ok(Some(deleted_task))
    }

    /// Move every active task to the trash with a single deletion stamp.
    pub fn soft_delete_all(&self, owner: &str) -> Result<usize> {
        let _guard = self.store.write_guard();
        let active = self.list_active(owner)?;
        if active.is_empty() {
            return Ok(0);
        }

        let count = active.len();
        let now = Utc::now();
        let mut deleted = self.list_deleted(owner)?;
        deleted.extend(active.into_iter().map(|t| t.into_deleted(now)));
        self.save_both(owner, &[], &deleted)?;

        tracing::info!(owner = %owner, count, "Moved all tasks to trash");

        Ok(count)
    }

    /// Bring a trashed task back to the end of the active list.
    pub fn restore(&self, owner: &str, id: &str) -> Result<Option<Task>> {
        let _guard = self.store.write_guard();
        let mut deleted = self.list_deleted(owner)?;

        let Some(index) = deleted.iter().position(|t| t.id() == id) else {
            tracing::debug!(owner = %owner, task_id = %id, "Restore skipped, task not in trash");
            return Ok(None);
        };
        let task = deleted.remove(index).restore();

        let mut active = self.list_active(owner)?;
        active.push(task.clone());
        self.save_both(owner, &active, &deleted)?;

        tracing::info!(owner = %owner, task_id = %id, "Restored task");

        Ok(Some(task))
    }

    /// Remove a trashed task for good.
    pub fn purge(&self, owner: &str, id: &str) -> Result<Option<DeletedTask>> {
        let _guard = self.store.write_guard();
        let mut deleted = self.list_deleted(owner)?;

        let Some(index) = deleted.iter().position(|t| t.id() == id) else {
            tracing::debug!(owner = %owner, task_id = %id, "Purge skipped, task not in trash");
            return Ok(None);
        };
        let purged = deleted.remove(index);
        self.save_deleted(owner, &deleted)?;

        tracing::info!(owner = %owner, task_id = %id, "Purged task");

        Ok(Some(purged))
    }

    /// Empty the trash. Returns how many tasks were removed.
    pub fn purge_all(&self, owner: &str) -> Result<usize> {
        let _guard = self.store.write_guard();
        let count = self.list_deleted(owner)?.len();
        self.save_deleted(owner, &[])?;

        tracing::info!(owner = %owner, count, "Emptied trash");

        Ok(count)
    }

    fn save_active(&self, owner: &str, tasks: &[Task]) -> Result<()> {
        set_json(&self.store, &keys::todos(owner), tasks)?;
        Ok(())
    }

    fn save_deleted(&self, owner: &str, tasks: &[DeletedTask]) -> Result<()> {
        set_json(&self.store, &keys::deleted_todos(owner), tasks)?;
        Ok(())
    }

    fn save_both(&self, owner: &str, active: &[Task], deleted: &[DeletedTask]) -> Result<()> {
        let active = serde_json::to_string(active)?;
        let deleted = serde_json::to_string(deleted)?;
        // Both lists land together or not at all
        self.store.set_many(&[
            (keys::todos(owner), active),
            (keys::deleted_todos(owner), deleted),
        ])?;
        Ok(())
    }
}

impl<S: Clone> Clone for TaskStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
