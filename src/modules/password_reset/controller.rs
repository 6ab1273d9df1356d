use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::modules::auth::crud::{SessionCrud, UserCrud};
use crate::modules::password_reset::{
    crud::{OtpCrud, ResetError},
    model::OneTimePasscode,
    schema::{FlowResponse, ForgetPasswordRequest, ResetPasswordRequest, VerifyOtpRequest},
};
use crate::services::hashing;
use crate::AppState;

type FlowResult = Result<Json<FlowResponse>, (StatusCode, Json<FlowResponse>)>;

fn respond(result: Result<String, ResetError>) -> FlowResult {
    match result {
        Ok(message) => Ok(Json(FlowResponse::ok(message))),
        Err(e) => Err((e.status_code(), Json(FlowResponse::err(e.to_string())))),
    }
}

pub async fn forget_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgetPasswordRequest>,
) -> FlowResult {
    respond(request_reset(&state, &req).await)
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyOtpRequest>,
) -> FlowResult {
    respond(verify_code(&state, &req).await)
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> FlowResult {
    respond(apply_reset(&state, &req).await)
}

async fn request_reset(
    state: &AppState,
    req: &ForgetPasswordRequest,
) -> Result<String, ResetError> {
    let email = req.email.trim().to_lowercase();

    if email.is_empty() {
        return Err(ResetError::EmailRequired);
    }

    UserCrud::new(state.db.clone())
        .find_by_email_ci(&email)
        .await?
        .ok_or(ResetError::AccountNotFound)?;

    // Serialize issue/verify/reset per address; these are read-modify-write
    // sequences over the same rows.
    let _guard = state.otp_locks.acquire(&email).await;

    let otps = OtpCrud::new(state.db.clone());
    otps.invalidate_unverified(&email).await?;

    let otp = OneTimePasscode::issue(&email);
    otps.insert(&otp).await?;

    // The code is durably stored before the send is attempted; a transport
    // failure is reported but never rolls the row back.
    if let Err(e) = state.mailer.send_reset_code(&email, &otp.code).await {
        tracing::error!(error = %e, "failed to send OTP email");
        return Err(ResetError::Notification(e));
    }

    if state.debug && state.mailer.delivers_locally() {
        return Ok(
            "OTP has been sent. Check the local mail directory for the OTP (development mode)."
                .to_string(),
        );
    }
    Ok("OTP has been sent to your email address.".to_string())
}

async fn verify_code(state: &AppState, req: &VerifyOtpRequest) -> Result<String, ResetError> {
    let email = req.email.trim().to_lowercase();
    let code = req.otp.trim();

    if email.is_empty() || code.is_empty() {
        return Err(ResetError::MissingVerifyFields);
    }

    let _guard = state.otp_locks.acquire(&email).await;

    let otps = OtpCrud::new(state.db.clone());
    let otp = otps
        .find_latest(&email, code, false)
        .await?
        .ok_or(ResetError::InvalidOtp)?;

    if otp.is_expired(Utc::now()) {
        return Err(ResetError::Expired);
    }

    otps.mark_verified(&otp.id).await?;

    Ok("OTP verified successfully.".to_string())
}

async fn apply_reset(state: &AppState, req: &ResetPasswordRequest) -> Result<String, ResetError> {
    let email = req.email.trim().to_lowercase();
    let code = req.otp.trim();

    if email.is_empty()
        || code.is_empty()
        || req.new_password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(ResetError::MissingResetFields);
    }

    if req.new_password != req.confirm_password {
        return Err(ResetError::PasswordMismatch);
    }

    if req.new_password.len() < 8 {
        return Err(ResetError::WeakPassword);
    }

    let _guard = state.otp_locks.acquire(&email).await;

    let otps = OtpCrud::new(state.db.clone());
    let otp = otps
        .find_latest(&email, code, true)
        .await?
        .ok_or(ResetError::NotVerified)?;

    // Both windows apply: the nominal expiry and the tighter bound since
    // issuance.
    let now = Utc::now();
    if otp.is_expired(now) || otp.reset_window_elapsed(now) {
        return Err(ResetError::SessionExpired);
    }

    // The account can vanish between requesting a code and finishing the
    // reset, hence the second lookup.
    let users = UserCrud::new(state.db.clone());
    let user = users
        .find_by_email_ci(&email)
        .await?
        .ok_or(ResetError::UserNotFound)?;

    let password_hash = hashing::hash_password(&req.new_password)
        .map_err(|e| ResetError::Internal(e.to_string()))?;
    users.update_password(&user.id, &password_hash).await?;

    SessionCrud::new(state.db.clone())
        .revoke_all_for_user(&user.id)
        .await?;

    otps.invalidate_all(&email).await?;

    tracing::info!(user_id = %user.id, "password reset completed");

    Ok(
        "Password has been reset successfully. You can now login with your new password."
            .to_string(),
    )
}
