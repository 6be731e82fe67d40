use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::Value as JsonValue;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::leadership_dto::{LeadershipPatch, LeadershipPayload, LeadershipResponse};
use crate::dto::pagination::{Page, PageLinks};
use crate::error::Result;
use crate::routes::{cached_json, request_key, AppJson, AppPath, AppQuery};
use crate::services::cache_service::CachedResource;
use crate::utils::media::MediaBase;
use crate::AppState;

const CACHED: CachedResource = CachedResource::Leadership;

pub async fn list_leadership(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<JsonValue>> {
    let key = request_key(&media, &uri);
    cached_json(&state, CACHED, &key, async {
        let listing = state
            .leadership_service
            .list(&query, state.page_request(query.page))
            .await?;
        let links = PageLinks::new(&media, &uri);
        Ok(Page::from_listing(listing, &links, |l| {
            LeadershipResponse::build(l, &media)
        }))
    })
    .await
}

pub async fn get_leader(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
) -> Result<Json<LeadershipResponse>> {
    let leader = state.leadership_service.get_by_id(id).await?;
    Ok(Json(LeadershipResponse::build(leader, &media)))
}

pub async fn create_leader(
    State(state): State<AppState>,
    media: MediaBase,
    AppJson(payload): AppJson<LeadershipPayload>,
) -> Result<(StatusCode, Json<LeadershipResponse>)> {
    payload.check(state.config.primary_language)?;
    let leader = state.leadership_service.create(&payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok((StatusCode::CREATED, Json(LeadershipResponse::build(leader, &media))))
}

pub async fn update_leader(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<LeadershipPayload>,
) -> Result<Json<LeadershipResponse>> {
    payload.check(state.config.primary_language)?;
    let leader = state.leadership_service.update(id, &payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(LeadershipResponse::build(leader, &media)))
}

pub async fn patch_leader(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<LeadershipPatch>,
) -> Result<Json<LeadershipResponse>> {
    let leader = state.leadership_service.patch(id, patch).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(LeadershipResponse::build(leader, &media)))
}

/// Vacancies referencing the leader go with it (ON DELETE CASCADE).
pub async fn delete_leader(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.leadership_service.delete(id).await?;
    state.cache.invalidate(CACHED).await;
    Ok(StatusCode::NO_CONTENT)
}
