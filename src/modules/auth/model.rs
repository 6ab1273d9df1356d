use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    /// Canonical login identifier; set to the signup email.
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl User {
    /// Full name, falling back to the username when both name fields are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// First letters of up to the first two name tokens, uppercased.
    /// "SU" when there is no usable name.
    pub fn initials(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let initials: String = full
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .collect::<String>()
            .to_uppercase();
        if initials.is_empty() {
            "SU".to_string()
        } else {
            initials
        }
    }
}

/// Split a full name into first and last parts for storage.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}
