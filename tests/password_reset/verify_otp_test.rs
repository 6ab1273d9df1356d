use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

async fn user_with_pending_otp(ctx: &TestContext) -> (String, String) {
    let email = test_email();
    ctx.signup("Alice Berg", &email, test_password()).await;
    ctx.server
        .post("/forget-password")
        .json(&json!({ "email": &email }))
        .await;
    let code = ctx.latest_otp_code(&email).await;
    (email, code)
}

#[tokio::test]
async fn verify_with_correct_code_marks_it_verified() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_pending_otp(&ctx).await;

    let response = ctx
        .server
        .post("/verify-otp")
        .json(&json!({
            "email": &email,
            "otp": &code
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OTP verified successfully.");

    let verified: bool = sqlx::query_scalar(
        "SELECT is_verified FROM password_reset_otps WHERE email = ? AND code = ?",
    )
    .bind(&email)
    .bind(&code)
    .fetch_one(&ctx.db)
    .await
    .unwrap();
    assert!(verified);

    ctx.cleanup();
}

#[tokio::test]
async fn verify_with_wrong_code_fails() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_pending_otp(&ctx).await;

    // Any code other than the stored one.
    let wrong = if code == "100000" { "100001" } else { "100000" };

    let response = ctx
        .server
        .post("/verify-otp")
        .json(&json!({
            "email": &email,
            "otp": wrong
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid OTP.");

    ctx.cleanup();
}

#[tokio::test]
async fn verify_after_expiry_fails_even_with_the_right_code() {
    let ctx = TestContext::new().await;
    let (email, code) = user_with_pending_otp(&ctx).await;

    ctx.rewind_latest_otp(&email, Duration::minutes(11), Duration::minutes(10))
        .await;

    let response = ctx
        .server
        .post("/verify-otp")
        .json(&json!({
            "email": &email,
            "otp": &code
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "OTP has expired. Please request a new one.");

    ctx.cleanup();
}

#[tokio::test]
async fn verify_with_missing_fields_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/verify-otp")
        .json(&json!({
            "email": "",
            "otp": ""
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Email and OTP are required.");

    ctx.cleanup();
}

#[tokio::test]
async fn verify_is_not_reachable_by_get() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/verify-otp")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);

    ctx.cleanup();
}
