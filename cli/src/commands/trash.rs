//! Trash commands
use std::process::ExitCode;

use todo_core::{App, KeyValueStore};

use super::{Output, TaskInfo};

fn not_in_trash(id: &str) {
    println!("No task with id {id} in the trash; nothing changed.");
}

pub fn list<S: KeyValueStore + Clone>(app: &App<S>, out: &Output) -> anyhow::Result<ExitCode> {
    let tasks: Vec<TaskInfo> = app
        .deleted_todos()?
        .into_iter()
        .map(TaskInfo::from)
        .collect();

    out.ok(tasks, |tasks| {
        if tasks.is_empty() {
            println!("Trash is empty.");
            return;
        }
        for task in tasks {
            println!("{}", task.line());
        }
        let noun = if tasks.len() == 1 { "item" } else { "items" };
        println!("\n{} {noun} in trash", tasks.len());
    })
}

pub fn restore<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    id: &str,
) -> anyhow::Result<ExitCode> {
    let task = app.restore_todo(id)?.map(TaskInfo::from);
    out.ok(task, |task| match task {
        Some(task) => println!("Restored: {}", task.text),
        None => not_in_trash(id),
    })
}

pub fn purge<S: KeyValueStore + Clone>(
    app: &App<S>,
    out: &Output,
    id: &str,
) -> anyhow::Result<ExitCode> {
    let task = app.purge_todo(id)?.map(TaskInfo::from);
    out.ok(task, |task| match task {
        Some(task) => println!("Permanently deleted: {}", task.text),
        None => not_in_trash(id),
    })
}

pub fn empty<S: KeyValueStore + Clone>(app: &App<S>, out: &Output) -> anyhow::Result<ExitCode> {
    let count = app.empty_trash()?;
    out.ok(count, |count| println!("Permanently deleted {count} task(s)."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::MemoryStore;

    #[test]
    fn test_trash_handlers() {
        let app = App::with_store(MemoryStore::new());
        let out = Output::new(true);
        app.register("Ana", "ana@x.com", "pw1");

        let a = app.add_todo("a").unwrap();
        let b = app.add_todo("b").unwrap();
        app.delete_all_todos().unwrap();
        list(&app, &out).unwrap();

        restore(&app, &out, &a.id).unwrap();
        assert_eq!(app.todos().unwrap(), vec![a]);

        purge(&app, &out, &b.id).unwrap();
        assert!(purge(&app, &out, &b.id).is_ok());
        assert!(app.deleted_todos().unwrap().is_empty());

        app.delete_all_todos().unwrap();
        empty(&app, &out).unwrap();
        assert!(app.deleted_todos().unwrap().is_empty());
        assert!(app.todos().unwrap().is_empty());
    }
}
