use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use sqlx::{Pool, Sqlite};
use std::path::PathBuf;

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub db: Pool<Sqlite>,
    pub outbox: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new() -> Self {
        let db = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let jwt_service = secureai_site::services::jwt::JwtService::new(
            "test-secret-key-for-testing-only".to_string(),
        );

        let outbox =
            std::env::temp_dir().join(format!("secureai-test-outbox-{}", uuid::Uuid::new_v4()));
        let mailer = secureai_site::services::mailer::Mailer::file(&outbox, "noreply@secureai.local")
            .expect("Failed to create file mailer");

        let app = secureai_site::create_app(db.clone(), jwt_service, mailer, true).await;
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, db, outbox }
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) {
        self.server
            .post("/signup")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "confirmPassword": password
            }))
            .await;
    }

    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self
            .server
            .post("/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .await;

        let body: serde_json::Value = response.json();
        body["token"].as_str().expect("login should return a token").to_string()
    }

    pub async fn latest_otp_code(&self, email: &str) -> String {
        sqlx::query_scalar::<_, String>(
            "SELECT code FROM password_reset_otps WHERE email = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .expect("an OTP row should exist")
    }

    pub async fn otp_count(&self, email: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM password_reset_otps WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
        .unwrap()
    }

    /// Rewrite the latest OTP's timestamps: `created_at` pushed `age` into the
    /// past, `expires_at` set to `created_at + ttl`.
    pub async fn rewind_latest_otp(&self, email: &str, age: Duration, ttl: Duration) {
        let created: DateTime<Utc> = Utc::now() - age;
        let expires = created + ttl;
        sqlx::query(
            r#"
            UPDATE password_reset_otps SET created_at = ?, expires_at = ?
            WHERE id = (
                SELECT id FROM password_reset_otps WHERE email = ?
                ORDER BY created_at DESC LIMIT 1
            )
            "#,
        )
        .bind(created)
        .bind(expires)
        .bind(email)
        .execute(&self.db)
        .await
        .unwrap();
    }

    pub fn cleanup(&self) {
        std::fs::remove_dir_all(&self.outbox).ok();
    }
}

// Helper to generate unique test email
#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

// Helper to generate test password
#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}
