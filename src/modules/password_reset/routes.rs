use axum::{routing::post, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn password_reset_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/forget-password", post(controller::forget_password))
        .route("/verify-otp", post(controller::verify_otp))
        .route("/reset-password", post(controller::reset_password))
}
