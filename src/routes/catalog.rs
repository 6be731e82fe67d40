//! Shared handlers for the department and work-type lookup tables. The
//! router attaches the concrete [`Catalog`] as an extension.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Extension, Json,
};

use crate::dto::catalog_dto::{CatalogPatch, CatalogPayload, CatalogResponse};
use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Page, PageLinks};
use crate::error::Result;
use crate::models::catalog::Catalog;
use crate::routes::{AppJson, AppPath, AppQuery};
use crate::utils::media::MediaBase;
use crate::AppState;

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<CatalogResponse>>> {
    let listing = state
        .catalog_service
        .list(catalog, &query, state.page_request(query.page))
        .await?;
    let links = PageLinks::new(&media, &uri);
    Ok(Json(Page::from_listing(listing, &links, CatalogResponse::from)))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CatalogResponse>> {
    let entry = state.catalog_service.get_by_id(catalog, id).await?;
    Ok(Json(entry.into()))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    AppJson(payload): AppJson<CatalogPayload>,
) -> Result<(StatusCode, Json<CatalogResponse>)> {
    payload.check(state.config.primary_language)?;
    let entry = state.catalog_service.create(catalog, &payload).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CatalogPayload>,
) -> Result<Json<CatalogResponse>> {
    payload.check(state.config.primary_language)?;
    let entry = state.catalog_service.update(catalog, id, &payload).await?;
    Ok(Json(entry.into()))
}

pub async fn patch_entry(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<CatalogPatch>,
) -> Result<Json<CatalogResponse>> {
    let entry = state.catalog_service.patch(catalog, id, patch).await?;
    Ok(Json(entry.into()))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.catalog_service.delete(catalog, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
