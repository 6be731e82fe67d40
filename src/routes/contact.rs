use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::dto::common::ListQuery;
use crate::dto::contact_dto::{
    ContactPatch, ContactPayload, ContactResponse, ContactUpdate, MessageResponse,
    StatusResponse, CONTACT_ACCEPTED, CONTACT_MARKED_READ,
};
use crate::dto::pagination::{Page, PageLinks};
use crate::error::Result;
use crate::routes::{AppJson, AppPath, AppQuery};
use crate::utils::media::MediaBase;
use crate::AppState;

/// Public submission. The stored row is not echoed back.
#[axum::debug_handler]
pub async fn create_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactPayload>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    state.contact_service.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: CONTACT_ACCEPTED.to_string(),
        }),
    ))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<ContactResponse>>> {
    let listing = state
        .contact_service
        .list(&query, state.page_request(query.page))
        .await?;
    let links = PageLinks::new(&media, &uri);
    Ok(Json(Page::from_listing(listing, &links, ContactResponse::from)))
}

pub async fn get_contact(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ContactResponse>> {
    let contact = state.contact_service.get_by_id(id).await?;
    Ok(Json(contact.into()))
}

pub async fn update_contact(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(update): AppJson<ContactUpdate>,
) -> Result<Json<ContactResponse>> {
    let contact = state.contact_service.replace(id, update).await?;
    Ok(Json(contact.into()))
}

pub async fn patch_contact(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<ContactPatch>,
) -> Result<Json<ContactResponse>> {
    let contact = state.contact_service.patch(id, patch).await?;
    Ok(Json(contact.into()))
}

pub async fn mark_as_read(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<StatusResponse>> {
    let contact = state.contact_service.mark_as_read(id).await?;
    tracing::info!(contact_id = contact.id, "contact marked as read");
    Ok(Json(StatusResponse {
        status: CONTACT_MARKED_READ.to_string(),
    }))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.contact_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
