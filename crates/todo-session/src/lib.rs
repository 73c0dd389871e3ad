//! Todo Accounts and Sessions
//!
//! - Accounts live in one global list keyed by unique email
//! - Registering or logging in establishes the current session
//! - The current session is persisted and restored on the next start
//! - Logging out clears the session only; accounts are never removed

mod account;
mod error;
mod password;
mod session;
mod store;

pub use account::Account;
pub use error::AuthError;
pub use session::Session;
pub use store::AccountStore;

pub type Result<T> = std::result::Result<T, AuthError>;
