use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::Value as JsonValue;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::content_dto::{BannerPatch, BannerPayload, BannerResponse};
use crate::dto::pagination::{Page, PageLinks};
use crate::error::Result;
use crate::routes::{cached_json, request_key, AppJson, AppPath, AppQuery};
use crate::services::cache_service::CachedResource;
use crate::utils::media::MediaBase;
use crate::AppState;

const CACHED: CachedResource = CachedResource::Banners;

pub async fn list_banners(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<JsonValue>> {
    let key = request_key(&media, &uri);
    cached_json(&state, CACHED, &key, async {
        let listing = state
            .banner_service
            .list(&query, state.page_request(query.page))
            .await?;
        let links = PageLinks::new(&media, &uri);
        Ok(Page::from_listing(listing, &links, |b| {
            BannerResponse::build(b, &media)
        }))
    })
    .await
}

#[axum::debug_handler]
pub async fn get_banner(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BannerResponse>> {
    let banner = state.banner_service.get_by_id(id).await?;
    Ok(Json(BannerResponse::build(banner, &media)))
}

pub async fn create_banner(
    State(state): State<AppState>,
    media: MediaBase,
    AppJson(payload): AppJson<BannerPayload>,
) -> Result<(StatusCode, Json<BannerResponse>)> {
    payload.check(state.config.primary_language)?;
    let banner = state.banner_service.create(&payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok((StatusCode::CREATED, Json(BannerResponse::build(banner, &media))))
}

pub async fn update_banner(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<BannerPayload>,
) -> Result<Json<BannerResponse>> {
    payload.check(state.config.primary_language)?;
    let banner = state.banner_service.update(id, &payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(BannerResponse::build(banner, &media)))
}

pub async fn patch_banner(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<BannerPatch>,
) -> Result<Json<BannerResponse>> {
    let banner = state.banner_service.patch(id, patch).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(BannerResponse::build(banner, &media)))
}

pub async fn delete_banner(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.banner_service.delete(id).await?;
    state.cache.invalidate(CACHED).await;
    Ok(StatusCode::NO_CONTENT)
}
