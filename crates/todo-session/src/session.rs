//! Session data structure

use serde::{Deserialize, Serialize};

/// Fill colors for the avatar fallback, picked by name length.
const AVATAR_COLORS: [&str; 8] = [
    "red", "blue", "green", "yellow", "purple", "pink", "indigo", "teal",
];

/// Public view of the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account id, also the owner id of the user's task lists
    pub id: String,
    pub email: String,
    pub name: String,
}

impl Session {
    /// Up to two uppercase initials from the display name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    pub fn avatar_color(&self) -> &'static str {
        AVATAR_COLORS[self.name.chars().count() % AVATAR_COLORS.len()]
    }
}
