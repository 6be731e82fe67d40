use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Page, PageLinks};
use crate::dto::vacancy_dto::{VacancyPatch, VacancyPayload, VacancyResponse};
use crate::error::Result;
use crate::routes::{AppJson, AppPath, AppQuery};
use crate::utils::media::MediaBase;
use crate::AppState;

/// Filters: `leadership`, `department`, `type_of_work`; `search` over title
/// and description; `ordering` by created_date or title.
pub async fn list_vacancies(
    State(state): State<AppState>,
    media: MediaBase,
    uri: Uri,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<VacancyResponse>>> {
    let primary = state.config.primary_language;
    let listing = state
        .vacancy_service
        .list(&query, state.page_request(query.page))
        .await?;
    let links = PageLinks::new(&media, &uri);
    Ok(Json(Page::from_listing(listing, &links, |v| {
        VacancyResponse::build(v, primary)
    })))
}

pub async fn get_vacancy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<VacancyResponse>> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    Ok(Json(VacancyResponse::build(
        vacancy,
        state.config.primary_language,
    )))
}

pub async fn create_vacancy(
    State(state): State<AppState>,
    AppJson(payload): AppJson<VacancyPayload>,
) -> Result<(StatusCode, Json<VacancyResponse>)> {
    let primary = state.config.primary_language;
    payload.check(primary)?;
    let vacancy = state.vacancy_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::build(vacancy, primary))))
}

pub async fn update_vacancy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<VacancyPayload>,
) -> Result<Json<VacancyResponse>> {
    let primary = state.config.primary_language;
    payload.check(primary)?;
    let vacancy = state.vacancy_service.update(id, &payload).await?;
    Ok(Json(VacancyResponse::build(vacancy, primary)))
}

pub async fn patch_vacancy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<VacancyPatch>,
) -> Result<Json<VacancyResponse>> {
    let vacancy = state.vacancy_service.patch(id, patch).await?;
    Ok(Json(VacancyResponse::build(
        vacancy,
        state.config.primary_language,
    )))
}

pub async fn delete_vacancy(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.vacancy_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
