use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::{json, Value as JsonValue};

use crate::dto::common::CheckedPayload;
use crate::dto::content_dto::{StatisticsPatch, StatisticsPayload};
use crate::error::Result;
use crate::models::statistics::Statistics;
use crate::routes::{cached_json, request_key, AppJson, AppPath};
use crate::services::cache_service::CachedResource;
use crate::utils::media::MediaBase;
use crate::AppState;

const CACHED: CachedResource = CachedResource::Statistics;

/// The collection route serves the newest row only, or `{}` when empty.
pub async fn latest_statistics(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
) -> Result<Json<JsonValue>> {
    let key = request_key(&media, &uri);
    cached_json(&state, CACHED, &key, async {
        let latest = state.statistics_service.latest().await?;
        Ok(match latest {
            Some(stats) => serde_json::to_value(stats)?,
            None => json!({}),
        })
    })
    .await
}

pub async fn get_statistics(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Statistics>> {
    Ok(Json(state.statistics_service.get_by_id(id).await?))
}

pub async fn create_statistics(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StatisticsPayload>,
) -> Result<(StatusCode, Json<Statistics>)> {
    payload.check(state.config.primary_language)?;
    let stats = state.statistics_service.create(&payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok((StatusCode::CREATED, Json(stats)))
}

pub async fn update_statistics(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<StatisticsPayload>,
) -> Result<Json<Statistics>> {
    payload.check(state.config.primary_language)?;
    let stats = state.statistics_service.update(id, &payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(stats))
}

pub async fn patch_statistics(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<StatisticsPatch>,
) -> Result<Json<Statistics>> {
    let stats = state.statistics_service.patch(id, patch).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(stats))
}

pub async fn delete_statistics(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.statistics_service.delete(id).await?;
    state.cache.invalidate(CACHED).await;
    Ok(StatusCode::NO_CONTENT)
}
