//! Account Store
//!
//! Owns the global account list and the current session. Every successful
//! register or login persists the session so it survives a restart.

use parking_lot::RwLock;
use std::sync::Arc;

use todo_storage::{get_json, get_json_or_default, keys, KeyValueStore, StorageError};

use crate::account::Account;
use crate::error::AuthError;
use crate::password;
use crate::session::Session;
use crate::Result;

pub struct AccountStore<S> {
    store: S,
    /// Currently logged-in user
    current: Arc<RwLock<Option<Session>>>,
}

impl<S: KeyValueStore> AccountStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Load the persisted session, if any, and make it current.
    ///
    /// An unreadable session record is discarded and treated as logged out.
    pub fn restore_session(&self) -> Result<Option<Session>> {
        let session = match get_json::<Session, _>(&self.store, keys::CURRENT_USER) {
            Ok(session) => session,
            Err(StorageError::Corrupt { key, source }) => {
                tracing::warn!(key = %key, error = %source, "Discarding unreadable session");
                self.store.remove(keys::CURRENT_USER)?;
                None
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(session) = &session {
            tracing::info!(user_id = %session.id, email = %session.email, "Restored session");
        }

        *self.current.write() = session.clone();
        Ok(session)
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn accounts(&self) -> Result<Vec<Account>> {
        Ok(get_json_or_default(&self.store, keys::USERS)?)
    }

    /// Create an account and log it in.
    pub fn try_register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let _guard = self.store.write_guard();
        let mut accounts = self.accounts()?;
        if accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::EmailTaken(email));
        }

        let account = Account::new(name, email, password)?;
        let session = account.session();
        accounts.push(account);

        self.store.set_many(&[
            (keys::USERS.to_string(), serde_json::to_string(&accounts)?),
            (keys::CURRENT_USER.to_string(), serde_json::to_string(&session)?),
        ])?;
        *self.current.write() = Some(session.clone());

        tracing::info!(user_id = %session.id, email = %session.email, "Registered account");

        Ok(session)
    }

    /// Boolean form of [`try_register`](Self::try_register).
    pub fn register(&self, name: &str, email: &str, password: &str) -> bool {
        match self.try_register(name, email, password) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(email = %email.trim(), error = %e, "Registration failed");
                false
            }
        }
    }

    /// Log in with matching email and password.
    ///
    /// Accounts still holding a plaintext password are upgraded to a hash.
    pub fn try_login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();

        let _guard = self.store.write_guard();
        let mut accounts = self.accounts()?;
        let account = accounts
            .iter_mut()
            .find(|a| a.email == email && a.verify_password(password))
            .ok_or(AuthError::InvalidCredentials)?;

        let session = account.session();
        let current = (keys::CURRENT_USER.to_string(), serde_json::to_string(&session)?);
        if password::needs_rehash(&account.password_hash) {
            account.password_hash = password::hash(password)?;
            let users = (keys::USERS.to_string(), serde_json::to_string(&accounts)?);
            self.store.set_many(&[users, current])?;
            tracing::info!(user_id = %session.id, "Upgraded plaintext password to hash");
        } else {
            self.store.set(&current.0, &current.1)?;
        }
        *self.current.write() = Some(session.clone());

        tracing::info!(user_id = %session.id, email = %session.email, "Logged in");

        Ok(session)
    }

    /// Boolean form of [`try_login`](Self::try_login).
    pub fn login(&self, email: &str, password: &str) -> bool {
        match self.try_login(email, password) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(email = %email.trim(), error = %e, "Login failed");
                false
            }
        }
    }

    /// End the current session. Accounts are left untouched.
    pub fn logout(&self) -> Result<()> {
        if let Some(session) = self.current.write().take() {
            tracing::info!(user_id = %session.id, "Logged out");
        }
        self.store.remove(keys::CURRENT_USER)?;
        Ok(())
    }
}

impl<S: Clone> Clone for AccountStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            current: Arc::clone(&self.current),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_storage::MemoryStore;

    fn store() -> AccountStore<MemoryStore> {
        AccountStore::new(MemoryStore::new())
    }

    #[test]
    fn test_register_and_login_scenario() {
        let auth = store();

        assert!(auth.register("Ana", "ana@x.com", "pw1"));
        assert!(!auth.register("Bob", "ana@x.com", "pw2"));
        assert!(auth.login("ana@x.com", "pw1"));
        assert!(!auth.login("ana@x.com", "pw2"));
    }

    #[test]
    fn test_duplicate_email_keeps_existing_account() {
        let auth = store();
        auth.register("Ana", "ana@x.com", "pw1");
        let before = auth.accounts().unwrap();

        assert!(matches!(
            auth.try_register("Bob", "ana@x.com", "pw2"),
            Err(AuthError::EmailTaken(_))
        ));

        let after = auth.accounts().unwrap();
        assert_eq!(before, after);
        assert_eq!(after[0].name, "Ana");
        assert!(after[0].verify_password("pw1"));
        assert!(!after[0].verify_password("pw2"));
    }

    #[test]
    fn test_register_establishes_session() {
        let auth = store();
        let session = auth.try_register(" Ana ", "ana@x.com", "pw1").unwrap();

        assert_eq!(session.name, "Ana");
        assert_eq!(auth.current(), Some(session.clone()));

        let persisted: Option<Session> = get_json(&auth.store, keys::CURRENT_USER).unwrap();
        assert_eq!(persisted, Some(session));
    }

    #[test]
    fn test_register_requires_fields() {
        let auth = store();
        assert!(matches!(
            auth.try_register("", "a@x.com", "pw"),
            Err(AuthError::MissingField("name"))
        ));
        assert!(matches!(
            auth.try_register("Ana", "  ", "pw"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            auth.try_register("Ana", "a@x.com", ""),
            Err(AuthError::MissingField("password"))
        ));
        assert!(auth.accounts().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_email() {
        let auth = store();
        assert!(matches!(
            auth.try_login("nobody@x.com", "pw"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_logout_keeps_accounts() {
        let auth = store();
        auth.register("Ana", "ana@x.com", "pw1");

        auth.logout().unwrap();
        assert!(auth.current().is_none());
        assert!(auth.store.get(keys::CURRENT_USER).unwrap().is_none());
        assert_eq!(auth.accounts().unwrap().len(), 1);

        assert!(auth.login("ana@x.com", "pw1"));
    }

    #[test]
    fn test_restore_session() {
        let kv = MemoryStore::new();
        let first = AccountStore::new(kv.clone());
        let session = first.try_register("Ana", "ana@x.com", "pw1").unwrap();

        let second = AccountStore::new(kv.clone());
        assert!(second.current().is_none());
        assert_eq!(second.restore_session().unwrap(), Some(session.clone()));
        assert_eq!(second.current(), Some(session));

        second.logout().unwrap();
        let third = AccountStore::new(kv);
        assert!(third.restore_session().unwrap().is_none());
    }

    #[test]
    fn test_restore_discards_corrupt_session() {
        let kv = MemoryStore::new();
        kv.set(keys::CURRENT_USER, "{oops").unwrap();

        let auth = AccountStore::new(kv.clone());
        assert!(auth.restore_session().unwrap().is_none());
        assert!(kv.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_plaintext_account_upgraded_on_login() {
        let kv = MemoryStore::new();
        kv.set(
            keys::USERS,
            r#"[{"id":"1717999999999","name":"Ana","email":"ana@x.com","password":"pw1"}]"#,
        )
        .unwrap();
        let auth = AccountStore::new(kv);

        assert!(!auth.login("ana@x.com", "wrong"));
        assert_eq!(auth.accounts().unwrap()[0].password_hash, "pw1");

        let session = auth.try_login("ana@x.com", "pw1").unwrap();
        assert_eq!(session.id, "1717999999999");

        let stored = &auth.accounts().unwrap()[0];
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert!(stored.verify_password("pw1"));
        assert!(auth.login("ana@x.com", "pw1"));
    }

    #[test]
    fn test_dollar_prefixed_plaintext_upgraded() {
        let kv = MemoryStore::new();
        kv.set(
            keys::USERS,
            r#"[{"id":"1","name":"Ana","email":"ana@x.com","password":"$secret"}]"#,
        )
        .unwrap();
        let auth = AccountStore::new(kv.clone());

        let session = auth.try_login("ana@x.com", "$secret").unwrap();
        assert_eq!(session.id, "1");

        let stored = &auth.accounts().unwrap()[0];
        assert!(stored.password_hash.starts_with("$argon2id$"));
        let persisted: Option<Session> = get_json(&kv, keys::CURRENT_USER).unwrap();
        assert_eq!(persisted, Some(session));
    }

    #[test]
    fn test_separate_stores_do_not_lose_accounts() {
        let kv = MemoryStore::new();
        let first = AccountStore::new(kv.clone());
        let second = AccountStore::new(kv.clone());

        std::thread::scope(|scope| {
            for (worker, auth) in [(0, &first), (1, &second)] {
                scope.spawn(move || {
                    for i in 0..3 {
                        let email = format!("user{worker}-{i}@x.com");
                        assert!(auth.register("User", &email, "pw"));
                    }
                });
            }
        });

        assert_eq!(AccountStore::new(kv).accounts().unwrap().len(), 6);
    }
}
