use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use crate::config::DbPool;
use crate::modules::auth::model::{Session, User};
use crate::services::hashing;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Name, email, and password are required.")]
    MissingSignupFields,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("An account with this email already exists.")]
    EmailTaken,

    #[error("Enter both email and password.")]
    MissingCredentials,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Authentication required.")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSignupFields
            | Self::PasswordMismatch
            | Self::EmailTaken
            | Self::MissingCredentials
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub struct UserCrud {
    pool: DbPool,
}

impl UserCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, password_hash, date_joined, last_login)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.date_joined)
        .bind(user.last_login)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    /// Case-insensitive email lookup, used by the login fallback and the
    /// password-reset flow.
    pub async fn find_by_email_ci(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER(?)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    pub async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn touch_last_login(
        &self,
        user_id: &str,
        when: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(when)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Credential check: the identifier is tried as a username first, then as
    /// a case-insensitive email whose canonical username is re-checked.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, AuthError> {
        let user = match self.find_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.find_by_email_ci(identifier).await?,
        };

        let user = user.ok_or(AuthError::InvalidCredentials)?;

        let is_valid = hashing::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

pub struct SessionCrud {
    pool: DbPool,
}

impl SessionCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, session: &Session) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, created_at, revoked)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(session.created_at)
        .bind(session.revoked)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn revoke(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET revoked = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn revoke_all_for_user(&self, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET revoked = TRUE WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
