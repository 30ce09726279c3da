//! Registered user and active-session data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    /// Argon2 hash in PHC string format.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The single logged-in identity for this installation. Overwritten on
/// login, deleted on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub login_time: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User, login_time: DateTime<Utc>) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            login_time,
        }
    }
}
