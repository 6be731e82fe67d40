use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Page, PageLinks};
use crate::dto::publication_dto::{
    InteractiveServicePatch, InteractiveServicePayload, InteractiveServiceResponse,
    ViewsResponse,
};
use crate::error::Result;
use crate::models::view_hit::ViewTarget;
use crate::routes::{AppJson, AppPath, AppQuery};
use crate::utils::client::ClientInfo;
use crate::utils::media::MediaBase;
use crate::AppState;

pub async fn list_services(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<InteractiveServiceResponse>>> {
    let listing = state
        .interactive_service_service
        .list(&query, state.page_request(query.page))
        .await?;
    let links = PageLinks::new(&media, &uri);
    Ok(Json(Page::from_listing(
        listing,
        &links,
        InteractiveServiceResponse::from,
    )))
}

pub async fn get_service(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<InteractiveServiceResponse>> {
    let service = state.interactive_service_service.get_by_id(id).await?;
    Ok(Json(service.into()))
}

pub async fn increment_views(
    State(state): State<AppState>,
    client: ClientInfo,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ViewsResponse>> {
    let views = state
        .view_service
        .increment(
            ViewTarget::InteractiveService,
            id,
            client.ip,
            client.user_agent.as_deref(),
        )
        .await?;
    Ok(Json(ViewsResponse { views }))
}

pub async fn create_service(
    State(state): State<AppState>,
    AppJson(payload): AppJson<InteractiveServicePayload>,
) -> Result<(StatusCode, Json<InteractiveServiceResponse>)> {
    payload.check(state.config.primary_language)?;
    let service = state.interactive_service_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(service.into())))
}

pub async fn update_service(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<InteractiveServicePayload>,
) -> Result<Json<InteractiveServiceResponse>> {
    payload.check(state.config.primary_language)?;
    let service = state
        .interactive_service_service
        .update(id, &payload)
        .await?;
    Ok(Json(service.into()))
}

pub async fn patch_service(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<InteractiveServicePatch>,
) -> Result<Json<InteractiveServiceResponse>> {
    let service = state.interactive_service_service.patch(id, patch).await?;
    Ok(Json(service.into()))
}

pub async fn delete_service(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.interactive_service_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
