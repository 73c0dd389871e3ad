//! Active list commands
use std::process::ExitCode;

use serde::Serialize;
use todo_core::{App, KeyValueStore, Progress};

use super::{Output, TaskInfo};

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<TaskInfo>,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

fn not_found(id: &str) {
    println!("No task with id {id}; nothing changed.");
}

pub fn add<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    text: &str,
) -> anyhow::Result<ExitCode> {
    let task = app.add_todo(text)?;
    out.ok(TaskInfo::from(task), |info| println!("Added {}", info.line()))
}

pub fn list<S: KeyValueStore + Clone>(app: &App<S>, out: &Output) -> anyhow::Result<ExitCode> {
    let tasks = app.todos()?;
    let progress = Progress::of(&tasks);

    let list = TaskList {
        tasks: tasks.into_iter().map(TaskInfo::from).collect(),
        completed: progress.completed,
        total: progress.total,
        percent: progress.percent(),
    };

    out.ok(list, |list| {
        if list.tasks.is_empty() {
            println!("No tasks yet. Add one with `todo add <TEXT>`.");
            return;
        }
        for task in &list.tasks {
            println!("{}", task.line());
        }
        println!(
            "\n{} of {} tasks completed ({}%)",
            list.completed, list.total, list.percent
        );
    })
}

pub fn toggle<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    id: &str,
) -> anyhow::Result<ExitCode> {
    let task = app.toggle_todo(id)?.map(TaskInfo::from);
    out.ok(task, |task| match task {
        Some(task) => println!("{}", task.line()),
        None => not_found(id),
    })
}

pub fn edit<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    id: &str,
    text: &str,
) -> anyhow::Result<ExitCode> {
    let task = app.edit_todo(id, text)?.map(TaskInfo::from);
    out.ok(task, |task| match task {
        Some(task) => println!("Updated {}", task.line()),
        None => not_found(id),
    })
}

pub fn delete<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    id: &str,
) -> anyhow::Result<ExitCode> {
    let task = app.delete_todo(id)?.map(TaskInfo::from);
    out.ok(task, |task| match task {
        Some(task) => println!("Moved to trash: {}", task.text),
        None => not_found(id),
    })
}

pub fn delete_all<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
) -> anyhow::Result<ExitCode> {
    let count = app.delete_all_todos()?;
    out.ok(count, |count| println!("Moved {count} task(s) to trash."))
}
