use axum::{extract::State, http::StatusCode, middleware::Next, response::Response};

use crate::presentation::http::state::AppState;

/// Header carrying the moderation shared secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Gates moderation routes behind the shared admin secret.
pub async fn require_admin(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !constant_time_eq(provided.as_bytes(), state.config.admin_token.as_bytes()) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}

/// Comparison that does not leak the matching prefix length through timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
