pub mod config;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::DbPool;
use modules::auth::auth_routes;
use modules::contact::contact_routes;
use modules::password_reset::password_reset_routes;
use services::jwt::JwtService;
use services::keyed_lock::KeyedLock;
use services::mailer::Mailer;
use services::security::security_headers;

pub struct AppState {
    pub db: DbPool,
    pub jwt_service: JwtService,
    pub mailer: Mailer,
    pub otp_locks: KeyedLock,
    /// Affects response wording only (development-mode mail notice).
    pub debug: bool,
}

pub async fn create_app(db: DbPool, jwt_service: JwtService, mailer: Mailer, debug: bool) -> Router {
    let state = Arc::new(AppState {
        db,
        jwt_service,
        mailer,
        otp_locks: KeyedLock::new(),
        debug,
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(password_reset_routes())
        .merge(contact_routes())
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "SecureAI API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
