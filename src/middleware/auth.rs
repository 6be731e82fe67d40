use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::utils::token::decode_token;
use crate::AppState;

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

/// Admits requests carrying a valid bearer token for a staff role and
/// stores the decoded claims in the request extensions.
pub async fn require_staff(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return reject(StatusCode::UNAUTHORIZED, "missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject(StatusCode::UNAUTHORIZED, "bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject(StatusCode::UNAUTHORIZED, "unsupported_scheme");
    };

    let claims = match decode_token(&state.config.jwt_secret, token.trim()) {
        Ok(claims) => claims,
        Err(_) => return reject(StatusCode::UNAUTHORIZED, "invalid_token"),
    };
    if !claims.is_staff() {
        tracing::warn!(sub = %claims.sub, role = ?claims.role, "non-staff token rejected");
        return reject(StatusCode::FORBIDDEN, "forbidden");
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}
