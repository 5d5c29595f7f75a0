use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::middleware::bearer_matches;
use crate::http::server::AppState;

/// Requires `Authorization: Bearer <admin key>`; the bot token is not accepted.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(admin_key) = state.admin_key.as_deref() else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    if bearer_matches(request.headers(), admin_key) {
        return Ok(next.run(request).await);
    }

    tracing::warn!(path = %request.uri().path(), "Rejected admin request");
    Err(StatusCode::UNAUTHORIZED)
}
