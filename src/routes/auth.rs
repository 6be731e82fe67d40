use axum::{extract::State, Json};
use chrono::Duration;
use validator::Validate;

use crate::dto::auth_dto::{TokenRequest, TokenResponse};
use crate::error::{Error, Result};
use crate::routes::AppJson;
use crate::utils::credentials::staff_credentials_match;
use crate::utils::token;
use crate::AppState;

const STAFF_ROLE: &str = "admin";

#[axum::debug_handler]
pub async fn issue_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate()?;
    let config = &state.config;

    let username = req.username.clone();
    let expected_username = config.admin_username.clone();
    let expected_hash = config.admin_password_hash.clone();
    let matched = tokio::task::spawn_blocking(move || {
        staff_credentials_match(&expected_username, &expected_hash, &req.username, &req.password)
    })
    .await
    .map_err(|e| Error::Internal(format!("credential check failed: {}", e)))?;

    if !matched {
        tracing::warn!(%username, "staff login rejected");
        return Err(Error::Unauthorized("invalid_credentials".to_string()));
    }

    let ttl = Duration::hours(config.token_ttl_hours);
    let access_token = token::issue_token(&config.jwt_secret, &username, STAFF_ROLE, ttl)?;
    tracing::info!(%username, "staff token issued");
    Ok(Json(TokenResponse::bearer(access_token, ttl.num_seconds())))
}
