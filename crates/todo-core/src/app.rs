//! Main application state container
//!
//! All task operations act on the lists of the logged-in user; with nobody
//! logged in they fail with [`CoreError::NotAuthenticated`].

use todo_session::{Account, AccountStore, Session};
use todo_storage::{KeyValueStore, SqliteStore};
use todo_tasks::{DeletedTask, Progress, Task, TaskStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct App<S = SqliteStore> {
    /// Accounts and the current session
    accounts: AccountStore<S>,
    /// Task lists of every owner
    tasks: TaskStore<S>,
}

impl App<SqliteStore> {
    /// Open the on-disk store described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = SqliteStore::open(&config.database_path)?;
        tracing::debug!(path = %config.database_path.display(), "Opened store");

        Ok(Self::with_store(store))
    }
}

impl<S: KeyValueStore + Clone> App<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            accounts: AccountStore::new(store.clone()),
            tasks: TaskStore::new(store),
        }
    }

    /// Restore the session left by the previous run.
    pub fn initialize(&self) -> Result<Option<Session>> {
        let session = self.accounts.restore_session()?;
        tracing::info!(authenticated = session.is_some(), "App initialized");
        Ok(session)
    }

    // === Account operations ===

    pub fn register(&self, name: &str, email: &str, password: &str) -> bool {
        self.accounts.register(name, email, password)
    }

    pub fn try_register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        Ok(self.accounts.try_register(name, email, password)?)
    }

    pub fn login(&self, email: &str, password: &str) -> bool {
        self.accounts.login(email, password)
    }

    pub fn try_login(&self, email: &str, password: &str) -> Result<Session> {
        Ok(self.accounts.try_login(email, password)?)
    }

    pub fn logout(&self) -> Result<()> {
        Ok(self.accounts.logout()?)
    }

    pub fn current_user(&self) -> Option<Session> {
        self.accounts.current()
    }

    pub fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.accounts()?)
    }

    fn owner(&self) -> Result<String> {
        self.accounts
            .current()
            .map(|session| session.id)
            .ok_or(CoreError::NotAuthenticated)
    }

    // === Active list ===

    pub fn todos(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.list_active(&self.owner()?)?)
    }

    pub fn progress(&self) -> Result<Progress> {
        Ok(self.tasks.progress(&self.owner()?)?)
    }

    pub fn add_todo(&self, text: &str) -> Result<Task> {
        Ok(self.tasks.create(&self.owner()?, text)?)
    }

    pub fn toggle_todo(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.tasks.toggle(&self.owner()?, id)?)
    }

    pub fn edit_todo(&self, id: &str, text: &str) -> Result<Option<Task>> {
        Ok(self.tasks.edit(&self.owner()?, id, text)?)
    }

    pub fn delete_todo(&self, id: &str) -> Result<Option<DeletedTask>> {
        Ok(self.tasks.soft_delete(&self.owner()?, id)?)
    }

    pub fn delete_all_todos(&self) -> Result<usize> {
        Ok(self.tasks.soft_delete_all(&self.owner()?)?)
    }

    // === Trash ===

    pub fn deleted_todos(&self) -> Result<Vec<DeletedTask>> {
        Ok(self.tasks.list_deleted(&self.owner()?)?)
    }

    pub fn restore_todo(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.tasks.restore(&self.owner()?, id)?)
    }

    pub fn purge_todo(&self, id: &str) -> Result<Option<DeletedTask>> {
        Ok(self.tasks.purge(&self.owner()?, id)?)
    }

    pub fn empty_trash(&self) -> Result<usize> {
        Ok(self.tasks.purge_all(&self.owner()?)?)
    }
}

impl<S: Clone> Clone for App<S> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            tasks: self.tasks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_storage::MemoryStore;

    fn app() -> App<MemoryStore> {
        App::with_store(MemoryStore::new())
    }

    #[test]
    fn test_requires_login() {
        let app = app();
        assert!(matches!(app.todos(), Err(CoreError::NotAuthenticated)));
        assert!(matches!(app.add_todo("x"), Err(CoreError::NotAuthenticated)));
        assert!(matches!(app.empty_trash(), Err(CoreError::NotAuthenticated)));
    }

    #[test]
    fn test_trash_scenario() {
        let app = app();
        assert!(app.register("Ana", "ana@x.com", "pw1"));

        let task = app.add_todo("Buy milk").unwrap();
        let deleted = app.delete_todo(&task.id).unwrap().unwrap();

        assert!(app.todos().unwrap().is_empty());
        assert_eq!(app.deleted_todos().unwrap(), vec![deleted.clone()]);
        assert_eq!(deleted.task, task);

        app.restore_todo(&task.id).unwrap();
        assert_eq!(app.todos().unwrap(), vec![task]);
        assert!(app.deleted_todos().unwrap().is_empty());
    }

    #[test]
    fn test_users_see_only_their_tasks() {
        let app = app();
        app.register("Ana", "ana@x.com", "pw1");
        let ana_task = app.add_todo("Ana's task").unwrap();

        app.logout().unwrap();
        app.register("Bob", "bob@x.com", "pw2");
        assert!(app.todos().unwrap().is_empty());
        assert!(app.delete_todo(&ana_task.id).unwrap().is_none());
        app.add_todo("Bob's task").unwrap();

        app.logout().unwrap();
        assert!(app.login("ana@x.com", "pw1"));
        assert_eq!(app.todos().unwrap(), vec![ana_task]);
    }

    #[test]
    fn test_progress_follows_toggles() {
        let app = app();
        app.register("Ana", "ana@x.com", "pw1");
        let a = app.add_todo("a").unwrap();
        app.add_todo("b").unwrap();
        app.add_todo("c").unwrap();
        app.add_todo("d").unwrap();

        app.toggle_todo(&a.id).unwrap();
        let progress = app.progress().unwrap();
        assert_eq!((progress.completed, progress.total), (1, 4));
        assert_eq!(progress.percent(), 25);
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("nested"));

        let task = {
            let app = App::open(&config).unwrap();
            assert!(app.initialize().unwrap().is_none());
            app.register("Ana", "ana@x.com", "pw1");
            app.add_todo("Buy milk").unwrap()
        };

        let app = App::open(&config).unwrap();
        let session = app.initialize().unwrap().unwrap();
        assert_eq!(session.email, "ana@x.com");
        assert_eq!(app.todos().unwrap(), vec![task]);

        app.logout().unwrap();
        let app = App::open(&config).unwrap();
        assert!(app.initialize().unwrap().is_none());
        assert!(matches!(app.todos(), Err(CoreError::NotAuthenticated)));
    }
}
