use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::content_dto::{UsefulLinkPatch, UsefulLinkPayload, UsefulLinkResponse};
use crate::dto::pagination::{Page, PageLinks};
use crate::error::Result;
use crate::routes::{AppJson, AppPath, AppQuery};
use crate::utils::media::MediaBase;
use crate::AppState;

pub async fn list_links(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<UsefulLinkResponse>>> {
    let listing = state
        .useful_link_service
        .list(&query, state.page_request(query.page))
        .await?;
    let links = PageLinks::new(&media, &uri);
    Ok(Json(Page::from_listing(listing, &links, |l| {
        UsefulLinkResponse::build(l, &media)
    })))
}

pub async fn get_link(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
) -> Result<Json<UsefulLinkResponse>> {
    let link = state.useful_link_service.get_by_id(id).await?;
    Ok(Json(UsefulLinkResponse::build(link, &media)))
}

pub async fn create_link(
    State(state): State<AppState>,
    media: MediaBase,
    AppJson(payload): AppJson<UsefulLinkPayload>,
) -> Result<(StatusCode, Json<UsefulLinkResponse>)> {
    payload.check(state.config.primary_language)?;
    let link = state.useful_link_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(UsefulLinkResponse::build(link, &media))))
}

pub async fn update_link(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UsefulLinkPayload>,
) -> Result<Json<UsefulLinkResponse>> {
    payload.check(state.config.primary_language)?;
    let link = state.useful_link_service.update(id, &payload).await?;
    Ok(Json(UsefulLinkResponse::build(link, &media)))
}

pub async fn patch_link(
    State(state): State<AppState>,
    media: MediaBase,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<UsefulLinkPatch>,
) -> Result<Json<UsefulLinkResponse>> {
    let link = state.useful_link_service.patch(id, patch).await?;
    Ok(Json(UsefulLinkResponse::build(link, &media)))
}

pub async fn delete_link(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> Result<StatusCode> {
    state.useful_link_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
