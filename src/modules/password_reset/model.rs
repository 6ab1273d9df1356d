use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifetime of a code, and also the bound on how long the verify step may
/// trail issuance.
pub const OTP_TTL_MINUTES: i64 = 10;

/// How long after issuance a verified code may still complete a reset.
/// Deliberately checked on top of `expires_at`.
pub const RESET_WINDOW_SECONDS: i64 = 600;

/// One emailed passcode. `is_verified` doubles as the invalidation flag:
/// a superseded or spent code is marked verified so it can never match the
/// unverified lookup again.
#[derive(Debug, Clone, FromRow)]
pub struct OneTimePasscode {
    pub id: String,
    pub email: String,
    pub code: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OneTimePasscode {
    pub fn issue(email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            code: generate_code(),
            is_verified: false,
            created_at: now,
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// The stricter post-verification window for completing a reset.
    pub fn reset_window_elapsed(&self, now: DateTime<Utc>) -> bool {
        (now - self.created_at).num_seconds() > RESET_WINDOW_SECONDS
    }
}

/// Uniform 6-digit code in [100000, 999999].
pub fn generate_code() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}
