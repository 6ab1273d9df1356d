use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub message: String,
    /// True when the embedded form on the index page submitted this.
    #[serde(default)]
    pub from_index: bool,
}

#[derive(Debug, Serialize)]
pub struct ContactSubmitResponse {
    pub message: &'static str,
    pub redirect_to: &'static str,
}

/// Validation failure echoes the submitted values back so the client can
/// re-render the form without losing input.
#[derive(Debug, Serialize)]
pub struct ContactErrorResponse {
    pub error: &'static str,
    pub values: ContactValues,
}

#[derive(Debug, Serialize)]
pub struct ContactValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub plan: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub plan: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
