use axum::http::StatusCode;

use crate::config::DbPool;
use crate::modules::password_reset::model::OneTimePasscode;
use crate::services::mailer::MailerError;

#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    #[error("Email is required.")]
    EmailRequired,

    #[error("Email and OTP are required.")]
    MissingVerifyFields,

    #[error("All fields are required.")]
    MissingResetFields,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Password must be at least 8 characters.")]
    WeakPassword,

    #[error("No account found with this email address. Please create an account first.")]
    AccountNotFound,

    #[error("Invalid OTP.")]
    InvalidOtp,

    #[error("OTP has expired. Please request a new one.")]
    Expired,

    #[error("OTP verification required. Please verify OTP first.")]
    NotVerified,

    #[error("OTP session expired. Please start over.")]
    SessionExpired,

    #[error("User not found.")]
    UserNotFound,

    #[error("Failed to send email: {0}. Please check email configuration or try again later.")]
    Notification(#[from] MailerError),

    // Storage faults surface without detail.
    #[error("An error occurred. Please try again.")]
    Database(#[from] sqlx::Error),

    #[error("An error occurred. Please try again.")]
    Internal(String),
}

impl ResetError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmailRequired
            | Self::MissingVerifyFields
            | Self::MissingResetFields
            | Self::PasswordMismatch
            | Self::WeakPassword
            | Self::InvalidOtp
            | Self::Expired
            | Self::NotVerified
            | Self::SessionExpired => StatusCode::BAD_REQUEST,
            Self::AccountNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Notification(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub struct OtpCrud {
    pool: DbPool,
}

impl OtpCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, otp: &OneTimePasscode) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_otps (id, email, code, is_verified, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&otp.id)
        .bind(&otp.email)
        .bind(&otp.code)
        .bind(otp.is_verified)
        .bind(otp.created_at)
        .bind(otp.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark every unverified code for the email as verified, collapsing any
    /// in-flight reset attempt before a new code is issued.
    pub async fn invalidate_unverified(&self, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE password_reset_otps SET is_verified = TRUE WHERE email = ? AND is_verified = FALSE",
        )
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Latest code matching (email, code) in the given verification state.
    pub async fn find_latest(
        &self,
        email: &str,
        code: &str,
        verified: bool,
    ) -> Result<Option<OneTimePasscode>, sqlx::Error> {
        sqlx::query_as::<_, OneTimePasscode>(
            r#"
            SELECT * FROM password_reset_otps
            WHERE email = ? AND code = ? AND is_verified = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn mark_verified(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE password_reset_otps SET is_verified = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Final sweep after a completed reset: every code for the email becomes
    /// unusable, whatever state it was in.
    pub async fn invalidate_all(&self, email: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE password_reset_otps SET is_verified = TRUE WHERE email = ?")
                .bind(email)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
