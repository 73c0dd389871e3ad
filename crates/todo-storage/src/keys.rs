//! Key layout shared by every crate that touches the store.

/// JSON array of every registered account.
pub const USERS: &str = "users";

/// JSON session of the logged-in user, absent when logged out.
pub const CURRENT_USER: &str = "currentUser";

const TODOS_PREFIX: &str = "todos_";
const DELETED_TODOS_PREFIX: &str = "deleted_todos_";

/// Active task list of `owner`.
pub fn todos(owner: &str) -> String {
    format!("{TODOS_PREFIX}{owner}")
}

/// Deleted task list of `owner`.
pub fn deleted_todos(owner: &str) -> String {
    format!("{DELETED_TODOS_PREFIX}{owner}")
}

/// Owner id encoded in an active-list key, if `key` is one.
pub fn owner_of_todos(key: &str) -> Option<&str> {
    key.strip_prefix(TODOS_PREFIX)
}
