//! Registered account

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password;
use crate::session::Session;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Unique across all accounts
    pub email: String,
    /// Argon2 PHC string; older data may still hold a plaintext `password`
    #[serde(alias = "password")]
    pub password_hash: String,
}

impl Account {
    pub fn new(name: String, email: String, password: &str) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash: password::hash(password)?,
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        password::verify(password, &self.password_hash)
    }

    pub fn session(&self) -> Session {
        Session {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}
