use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// SIGNUP
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email or username; the two coincide for accounts created here.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

// =============================================================================
// LOGOUT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub initials: String,
    pub company: &'static str,
    pub role: &'static str,
    pub plan: &'static str,
    /// Human-readable timestamps for direct display.
    pub joined: String,
    pub last_login: String,
    /// RFC 3339 forms for client-side formatting.
    pub joined_iso: String,
    pub last_login_iso: String,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
