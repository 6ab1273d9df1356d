use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::extractor::CurrentUser;
use crate::modules::auth::schema::ErrorResponse;
use crate::modules::contact::{
    crud::ContactCrud,
    model::{normalize_plan, ContactMessage},
    schema::{
        ContactErrorResponse, ContactMessageResponse, ContactRequest, ContactSubmitResponse,
        ContactValues,
    },
};
use crate::AppState;

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Response {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_string();
    let subject = req.subject.trim().to_string();
    let plan = normalize_plan(req.plan.trim());
    let message = req.message.trim().to_string();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactErrorResponse {
                error: "Name, email, and message are required.",
                values: ContactValues {
                    name,
                    email,
                    subject,
                    // Echo back exactly what was typed, not the normalized plan.
                    plan: req.plan.trim().to_string(),
                    message,
                },
            }),
        )
            .into_response();
    }

    let msg = ContactMessage {
        id: Uuid::new_v4().to_string(),
        name,
        email,
        subject,
        plan,
        message,
        created_at: Utc::now(),
    };

    if let Err(e) = ContactCrud::new(state.db.clone()).create(&msg).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(ContactSubmitResponse {
            message: "Successful send! We received your message.",
            redirect_to: if req.from_index {
                "/?contact_sent=true"
            } else {
                "/contact"
            },
        }),
    )
        .into_response()
}

pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
) -> Result<Json<Vec<ContactMessageResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let messages = ContactCrud::new(state.db.clone()).list().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    Ok(Json(
        messages
            .into_iter()
            .map(|m| ContactMessageResponse {
                id: m.id,
                name: m.name,
                email: m.email,
                subject: m.subject,
                plan: m.plan,
                message: m.message,
                created_at: m.created_at,
            })
            .collect(),
    ))
}
