use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::{json, Value as JsonValue};

use crate::dto::common::CheckedPayload;
use crate::dto::content_dto::{AboutPatch, AboutPayload, AboutResponse};
use crate::error::Result;
use crate::routes::{cached_json, request_key, AppJson, AppPath};
use crate::services::cache_service::CachedResource;
use crate::utils::media::MediaBase;
use crate::AppState;

const CACHED: CachedResource = CachedResource::About;

/// Newest organisation profile, or `{}` when none exists.
pub async fn latest_about(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
) -> Result<Json<JsonValue>> {
    let key = request_key(&media, &uri);
    cached_json(&state, CACHED, &key, async {
        let latest = state.about_service.latest().await?;
        Ok(match latest {
            Some(about) => serde_json::to_value(AboutResponse::from(about))?,
            None => json!({}),
        })
    })
    .await
}

pub async fn get_about(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<AboutResponse>> {
    let about = state.about_service.get_by_id(id).await?;
    Ok(Json(AboutResponse::from(about)))
}

pub async fn create_about(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AboutPayload>,
) -> Result<(StatusCode, Json<AboutResponse>)> {
    payload.check(state.config.primary_language)?;
    let about = state.about_service.create(&payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok((StatusCode::CREATED, Json(AboutResponse::from(about))))
}

pub async fn update_about(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<AboutPayload>,
) -> Result<Json<AboutResponse>> {
    payload.check(state.config.primary_language)?;
    let about = state.about_service.update(id, &payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(AboutResponse::from(about)))
}

pub async fn patch_about(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<AboutPatch>,
) -> Result<Json<AboutResponse>> {
    let about = state.about_service.patch(id, patch).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(AboutResponse::from(about)))
}

pub async fn delete_about(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> Result<StatusCode> {
    state.about_service.delete(id).await?;
    state.cache.invalidate(CACHED).await;
    Ok(StatusCode::NO_CONTENT)
}
