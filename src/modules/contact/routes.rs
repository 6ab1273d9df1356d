use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn contact_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", post(controller::submit_contact))
        .route("/contact/messages", get(controller::list_messages))
}
