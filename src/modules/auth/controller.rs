use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::auth::{
    crud::{AuthError, SessionCrud, UserCrud},
    extractor::CurrentUser,
    model::{split_full_name, Session, User},
    schema::{
        ErrorResponse, LoginRequest, LoginResponse, LogoutResponse, ProfileResponse,
        SignupRequest, SignupResponse,
    },
};
use crate::services::hashing;
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(e: AuthError) -> ApiError {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(reject(AuthError::MissingSignupFields));
    }

    if req.password != req.confirm_password {
        return Err(reject(AuthError::PasswordMismatch));
    }

    if req.validate().is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid email format")),
        ));
    }

    let crud = UserCrud::new(state.db.clone());

    if crud.username_exists(&email).await.map_err(|e| reject(e.into()))? {
        return Err(reject(AuthError::EmailTaken));
    }

    let (first_name, last_name) = split_full_name(&name);

    let password_hash = hashing::hash_password(&req.password)
        .map_err(|e| reject(AuthError::Hashing(e.to_string())))?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: email.clone(),
        email,
        first_name,
        last_name,
        password_hash,
        date_joined: Utc::now(),
        last_login: None,
    };

    crud.create(&user).await.map_err(|e| reject(e.into()))?;

    tracing::info!(user_id = %user.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created successfully. Please sign in.",
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let identifier = req.username.trim().to_lowercase();

    if identifier.is_empty() || req.password.is_empty() {
        return Err(reject(AuthError::MissingCredentials));
    }

    let users = UserCrud::new(state.db.clone());
    let user = users.login(&identifier, &req.password).await.map_err(reject)?;

    let session = Session {
        id: Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        created_at: Utc::now(),
        revoked: false,
    };
    SessionCrud::new(state.db.clone())
        .create(&session)
        .await
        .map_err(|e| reject(e.into()))?;

    users
        .touch_last_login(&user.id, session.created_at)
        .await
        .map_err(|e| reject(e.into()))?;

    let token = state
        .jwt_service
        .create_session_token(&user.id, &user.username, &session.id)
        .map_err(|e| reject(AuthError::Token(e.to_string())))?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: state.jwt_service.get_session_duration_secs(),
        }),
    ))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> Result<(StatusCode, Json<LogoutResponse>), ApiError> {
    SessionCrud::new(state.db.clone())
        .revoke(&current.session_id)
        .await
        .map_err(|e| reject(e.into()))?;

    Ok((
        StatusCode::OK,
        Json(LogoutResponse {
            message: "You have been signed out.",
        }),
    ))
}

pub async fn profile(current: CurrentUser) -> Json<ProfileResponse> {
    let user = &current.user;

    let display_format = "%b %e, %Y %H:%M";

    Json(ProfileResponse {
        name: user.display_name(),
        email: user.email.clone(),
        initials: user.initials(),
        company: "",
        role: "SecureAI User",
        plan: "Starter",
        joined: user.date_joined.format(display_format).to_string(),
        last_login: user
            .last_login
            .map(|t| t.format(display_format).to_string())
            .unwrap_or_default(),
        joined_iso: user.date_joined.to_rfc3339(),
        last_login_iso: user
            .last_login
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    })
}
