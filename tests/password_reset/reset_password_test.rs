use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

async fn user_with_verified_otp(ctx: &TestContext) -> (String, String) {
    let email = test_email();
    ctx.signup("Alice Berg", &email, test_password()).await;
    ctx.server
        .post("/forget-password")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.latest_otp_code(&email).await;
    ctx.server
        .post("/verify-otp")
        .json(&json!({ "email": &email, "otp": &code }))
        .await
        .assert_status(StatusCode::OK);
    (email, code)
}

#[tokio::test]
async fn full_reset_flow_swaps_the_password() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_verified_otp(&ctx).await;

    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "longenough1",
            "confirm_password": "longenough1"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    // Old password no longer authenticates.
    ctx.server
        .post("/login")
        .json(&json!({ "username": &email, "password": test_password() }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // New one does.
    ctx.server
        .post("/login")
        .json(&json!({ "username": &email, "password": "longenough1" }))
        .await
        .assert_status(StatusCode::OK);

    // Every code for the address is spent.
    let unverified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM password_reset_otps WHERE email = ? AND is_verified = FALSE",
    )
    .bind(&email)
    .fetch_one(&ctx.db)
    .await
    .unwrap();
    assert_eq!(unverified, 0);

    ctx.cleanup();
}

#[tokio::test]
async fn reset_revokes_existing_sessions() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.signup("Alice Berg", &email, test_password()).await;
    let token = ctx.login_token(&email, test_password()).await;

    ctx.server
        .post("/forget-password")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.latest_otp_code(&email).await;
    ctx.server
        .post("/verify-otp")
        .json(&json!({ "email": &email, "otp": &code }))
        .await;
    ctx.server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "longenough1",
            "confirm_password": "longenough1"
        }))
        .await
        .assert_status(StatusCode::OK);

    ctx.server
        .get("/profile")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup();
}

#[tokio::test]
async fn reset_without_verification_fails() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.signup("Alice Berg", &email, test_password()).await;
    ctx.server
        .post("/forget-password")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.latest_otp_code(&email).await;

    // Skip the verify step entirely.
    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "longenough1",
            "confirm_password": "longenough1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "OTP verification required. Please verify OTP first.");

    ctx.cleanup();
}

#[tokio::test]
async fn reset_outside_the_session_window_fails() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_verified_otp(&ctx).await;

    // Push creation past the 600s window while keeping the row unexpired,
    // so only the tighter bound can trip.
    ctx.rewind_latest_otp(&email, Duration::seconds(700), Duration::minutes(30))
        .await;

    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "longenough1",
            "confirm_password": "longenough1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "OTP session expired. Please start over.");

    ctx.cleanup();
}

#[tokio::test]
async fn reset_with_mismatched_passwords_fails() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_verified_otp(&ctx).await;

    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "longenough1",
            "confirm_password": "different1x"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Passwords do not match.");

    ctx.cleanup();
}

#[tokio::test]
async fn reset_with_short_password_fails() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_verified_otp(&ctx).await;

    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "short1",
            "confirm_password": "short1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Password must be at least 8 characters.");

    ctx.cleanup();
}

#[tokio::test]
async fn reset_with_missing_fields_fails() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": "alice@example.com",
            "otp": "",
            "new_password": "longenough1",
            "confirm_password": "longenough1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "All fields are required.");

    ctx.cleanup();
}

#[tokio::test]
async fn reset_for_an_account_deleted_mid_flow_returns_not_found() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_verified_otp(&ctx).await;

    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind(&email)
        .execute(&ctx.db)
        .await
        .unwrap();

    let response = ctx
        .server
        .post("/reset-password")
        .json(&json!({
            "email": &email,
            "otp": &code,
            "new_password": "longenough1",
            "confirm_password": "longenough1"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "User not found.");

    ctx.cleanup();
}
