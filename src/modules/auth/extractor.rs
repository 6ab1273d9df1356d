use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::modules::auth::{
    crud::{AuthError, SessionCrud, UserCrud},
    model::User,
    schema::ErrorResponse,
};
use crate::AppState;

/// Authenticated request context: the bearer token must verify and its
/// session row must still be live.
pub struct CurrentUser {
    pub user: User,
    pub session_id: String,
}

fn unauthenticated() -> (StatusCode, Json<ErrorResponse>) {
    let e = AuthError::Unauthenticated;
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(unauthenticated)?;

        let data = state
            .jwt_service
            .verify_session_token(token)
            .map_err(|_| unauthenticated())?;

        let session = SessionCrud::new(state.db.clone())
            .find_by_id(&data.claims.jti)
            .await
            .map_err(|_| unauthenticated())?
            .ok_or_else(unauthenticated)?;

        if session.revoked {
            return Err(unauthenticated());
        }

        let user = UserCrud::new(state.db.clone())
            .find_by_id(&data.claims.sub)
            .await
            .map_err(|_| unauthenticated())?
            .ok_or_else(unauthenticated)?;

        Ok(CurrentUser {
            user,
            session_id: session.id,
        })
    }
}
