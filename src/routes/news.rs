use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::Value as JsonValue;

use crate::dto::common::{CheckedPayload, LanguageQuery, ListQuery};
use crate::dto::news_dto::{NewsPatch, NewsPayload, NewsResponse};
use crate::dto::pagination::{Page, PageLinks};
use crate::dto::publication_dto::ViewsResponse;
use crate::error::Result;
use crate::models::view_hit::ViewTarget;
use crate::routes::{cached_json, request_key, AppJson, AppPath, AppQuery};
use crate::services::cache_service::CachedResource;
use crate::utils::client::ClientInfo;
use crate::utils::media::MediaBase;
use crate::AppState;

const CACHED: CachedResource = CachedResource::News;

/// `?language=` picks the `translated_*` fields; the full maps are always
/// included.
pub async fn list_news(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<JsonValue>> {
    let key = request_key(&media, &uri);
    let primary = state.config.primary_language;
    let language = query.language.clone().unwrap_or_default();
    cached_json(&state, CACHED, &key, async {
        let listing = state
            .news_service
            .list(&query, state.page_request(query.page))
            .await?;
        let links = PageLinks::new(&media, &uri);
        Ok(Page::from_listing(listing, &links, |n| {
            NewsResponse::build(n, &media, &language, primary)
        }))
    })
    .await
}

pub async fn get_news(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppQuery(language): AppQuery<LanguageQuery>,
) -> Result<Json<NewsResponse>> {
    let news = state.news_service.get_by_id(id).await?;
    Ok(Json(NewsResponse::build(
        news,
        &media,
        language.code(),
        state.config.primary_language,
    )))
}

pub async fn increment_views(
    State(state): State<AppState>,
    client: ClientInfo,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ViewsResponse>> {
    let views = state
        .view_service
        .increment(ViewTarget::News, id, client.ip, client.user_agent.as_deref())
        .await?;
    Ok(Json(ViewsResponse { views }))
}

pub async fn create_news(
    State(state): State<AppState>,
    media: MediaBase,
    AppJson(payload): AppJson<NewsPayload>,
) -> Result<(StatusCode, Json<NewsResponse>)> {
    let primary = state.config.primary_language;
    payload.check(primary)?;
    let news = state.news_service.create(&payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok((
        StatusCode::CREATED,
        Json(NewsResponse::build(news, &media, primary.code(), primary)),
    ))
}

pub async fn update_news(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<NewsPayload>,
) -> Result<Json<NewsResponse>> {
    let primary = state.config.primary_language;
    payload.check(primary)?;
    let news = state.news_service.update(id, &payload).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(NewsResponse::build(news, &media, primary.code(), primary)))
}

pub async fn patch_news(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<NewsPatch>,
) -> Result<Json<NewsResponse>> {
    let primary = state.config.primary_language;
    let news = state.news_service.patch(id, patch).await?;
    state.cache.invalidate(CACHED).await;
    Ok(Json(NewsResponse::build(news, &media, primary.code(), primary)))
}

pub async fn delete_news(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> Result<StatusCode> {
    state.news_service.delete(id).await?;
    state.cache.invalidate(CACHED).await;
    Ok(StatusCode::NO_CONTENT)
}
