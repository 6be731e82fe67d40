use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Page, PageLinks};
use crate::dto::publication_dto::{DecisionPatch, DecisionPayload, DecisionResponse, ViewsResponse};
use crate::error::Result;
use crate::models::view_hit::ViewTarget;
use crate::routes::{AppJson, AppPath, AppQuery};
use crate::utils::client::ClientInfo;
use crate::utils::media::MediaBase;
use crate::AppState;

pub async fn list_decisions(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<DecisionResponse>>> {
    let listing = state
        .decision_service
        .list(&query, state.page_request(query.page))
        .await?;
    let links = PageLinks::new(&media, &uri);
    Ok(Json(Page::from_listing(listing, &links, DecisionResponse::from)))
}

pub async fn get_decision(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DecisionResponse>> {
    let decision = state.decision_service.get_by_id(id).await?;
    Ok(Json(decision.into()))
}

pub async fn increment_views(
    State(state): State<AppState>,
    client: ClientInfo,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ViewsResponse>> {
    let views = state
        .view_service
        .increment(
            ViewTarget::Decision,
            id,
            client.ip,
            client.user_agent.as_deref(),
        )
        .await?;
    Ok(Json(ViewsResponse { views }))
}

pub async fn create_decision(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DecisionPayload>,
) -> Result<(StatusCode, Json<DecisionResponse>)> {
    payload.check(state.config.primary_language)?;
    let decision = state.decision_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(decision.into())))
}

pub async fn update_decision(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<DecisionPayload>,
) -> Result<Json<DecisionResponse>> {
    payload.check(state.config.primary_language)?;
    let decision = state
        .decision_service
        .update(id, &payload)
        .await?;
    Ok(Json(decision.into()))
}

pub async fn patch_decision(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<DecisionPatch>,
) -> Result<Json<DecisionResponse>> {
    let decision = state.decision_service.patch(id, patch).await?;
    Ok(Json(decision.into()))
}

pub async fn delete_decision(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.decision_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
