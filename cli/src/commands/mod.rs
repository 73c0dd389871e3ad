//! Subcommand handlers
pub mod account;
pub mod todos;
pub mod trash;

use std::process::ExitCode;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use todo_core::{DeletedTask, Task};

#[derive(Debug, Serialize)]
pub struct TaskInfo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Task> for TaskInfo {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            text: task.text,
            completed: task.completed,
            created_at: task.created_at,
            deleted_at: None,
        }
    }
}

impl From<DeletedTask> for TaskInfo {
    fn from(deleted: DeletedTask) -> Self {
        let deleted_at = deleted.deleted_at;
        Self {
            deleted_at: Some(deleted_at),
            ..Self::from(deleted.task)
        }
    }
}

impl TaskInfo {
    fn line(&self) -> String {
        let mark = if self.completed { "x" } else { " " };
        match self.deleted_at {
            Some(at) => format!("[{mark}] {}  {}  (deleted {})", self.id, self.text, local_time(at)),
            None => format!("[{mark}] {}  {}", self.id, self.text),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Renders results either as JSON or as plain text.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn ok<T, F>(&self, data: T, render: F) -> anyhow::Result<ExitCode>
    where
        T: Serialize,
        F: FnOnce(&T),
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&CommandResult::ok(data))?);
        } else {
            render(&data);
        }
        Ok(ExitCode::SUCCESS)
    }

    pub fn fail(&self, message: String) -> anyhow::Result<ExitCode> {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&CommandResult::<()>::err(message))?
            );
        } else {
            eprintln!("error: {message}");
        }
        Ok(ExitCode::FAILURE)
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
