use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(controller::signup))
        .route("/login", post(controller::login))
        .route("/logout", post(controller::logout))
        .route("/profile", get(controller::profile))
}
