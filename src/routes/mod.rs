use std::future::Future;

use axum::{
    extract::{DefaultBodyLimit, FromRequest, FromRequestParts},
    http::{header, HeaderValue, Uri},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tower::Layer;
use tower_http::{
    compression::CompressionLayer, normalize_path::NormalizePath,
    normalize_path::NormalizePathLayer, services::ServeDir,
    set_header::{SetResponseHeader, SetResponseHeaderLayer}, trace::TraceLayer,
};

use crate::error::{Error, Result};
use crate::middleware::auth::require_staff;
use crate::middleware::cors::permissive_cors;
use crate::middleware::rate_limit::{new_rps_state, rps_middleware};
use crate::models::catalog::Catalog;
use crate::services::cache_service::{CachedResource, ResponseCache};
use crate::utils::media::{MediaBase, MEDIA_PREFIX};
use crate::AppState;

pub mod about;
pub mod auth;
pub mod banner;
pub mod catalog;
pub mod contact;
pub mod decision;
pub mod health;
pub mod interactive_service;
pub mod leadership;
pub mod media;
pub mod news;
pub mod statistics;
pub mod useful_link;
pub mod vacancy;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// JSON body extractor whose rejections use the crate's error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// Query string extractor with the crate's error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct AppQuery<T>(pub T);

/// Path parameter extractor with the crate's error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct AppPath<T>(pub T);

/// Query parameters that can change a cached list body.
const CACHE_KEY_PARAMS: [&str; 5] = ["category", "language", "ordering", "page", "search"];

/// Everything that changes a cached list body: origin (media URLs), path and
/// the recognised query parameters in a fixed order. Unknown parameters are
/// dropped so they cannot mint new entries.
pub fn request_key(media: &MediaBase, uri: &Uri) -> String {
    let mut params: Vec<(String, String)> = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(key, _)| CACHE_KEY_PARAMS.contains(&key.as_ref()))
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();
    params.sort();

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &params {
        query.append_pair(key, value);
    }
    format!(
        "{}{}?{}",
        media.0.as_deref().unwrap_or(""),
        uri.path(),
        query.finish()
    )
}

/// Serves a list body from the response cache, running `build` only on a
/// miss.
pub async fn cached_json<T, Fut>(
    state: &AppState,
    resource: CachedResource,
    request_key: &str,
    build: Fut,
) -> Result<Json<JsonValue>>
where
    T: Serialize,
    Fut: Future<Output = Result<T>>,
{
    let key = ResponseCache::key(resource, request_key);
    if let Some(hit) = state.cache.get(&key).await {
        return Ok(Json(hit));
    }
    let value = serde_json::to_value(build.await?)?;
    state.cache.set(resource, key, value.clone()).await;
    Ok(Json(value))
}

fn catalog_routes(path: &str, catalog: Catalog) -> (Router<AppState>, Router<AppState>) {
    let item = format!("{}/:id", path);
    let public = Router::new()
        .route(path, get(catalog::list_entries))
        .route(&item, get(catalog::get_entry))
        .layer(Extension(catalog));
    let staff = Router::new()
        .route(path, post(catalog::create_entry))
        .route(
            &item,
            put(catalog::update_entry)
                .patch(catalog::patch_entry)
                .delete(catalog::delete_entry),
        )
        .layer(Extension(catalog));
    (public, staff)
}

/// Uploaded files. Everything is served sandboxed and unsniffed so an SVG
/// opened directly cannot run script on this origin.
fn media_files(root: &str) -> SetResponseHeader<SetResponseHeader<ServeDir, HeaderValue>, HeaderValue> {
    let sandboxed = SetResponseHeaderLayer::overriding(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("sandbox"),
    )
    .layer(ServeDir::new(root));
    SetResponseHeaderLayer::overriding(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    )
    .layer(sandboxed)
}

/// Full HTTP surface. Read routes are open, writes sit behind
/// `require_staff`, and the anonymous write routes are rate limited.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let (departments_public, departments_staff) =
        catalog_routes("/api/departments", Catalog::Department);
    let (work_types_public, work_types_staff) =
        catalog_routes("/api/work-types", Catalog::TypeOfWork);

    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/token", post(auth::issue_token))
        .route("/api/banners", get(banner::list_banners))
        .route("/api/banners/:id", get(banner::get_banner))
        .route("/api/statistics", get(statistics::latest_statistics))
        .route("/api/statistics/:id", get(statistics::get_statistics))
        .route("/api/useful-links", get(useful_link::list_links))
        .route("/api/useful-links/:id", get(useful_link::get_link))
        .route("/api/news", get(news::list_news))
        .route("/api/news/:id", get(news::get_news))
        .route("/api/about", get(about::latest_about))
        .route("/api/about/:id", get(about::get_about))
        .route("/api/leadership", get(leadership::list_leadership))
        .route("/api/leadership/:id", get(leadership::get_leader))
        .route("/api/vacancies", get(vacancy::list_vacancies))
        .route("/api/vacancies/:id", get(vacancy::get_vacancy))
        .route(
            "/api/interactive-services",
            get(interactive_service::list_services),
        )
        .route(
            "/api/interactive-services/:id",
            get(interactive_service::get_service),
        )
        .route("/api/decisions", get(decision::list_decisions))
        .route("/api/decisions/:id", get(decision::get_decision))
        .merge(departments_public)
        .merge(work_types_public);

    let throttled_api = Router::new()
        .route("/api/contacts", post(contact::create_contact))
        .route("/api/news/:id/increment_views", get(news::increment_views))
        .route(
            "/api/interactive-services/:id/increment_views",
            get(interactive_service::increment_views),
        )
        .route(
            "/api/decisions/:id/increment_views",
            get(decision::increment_views),
        )
        .route_layer(from_fn_with_state(
            new_rps_state(state.config.public_rps, state.config.trust_proxy_headers),
            rps_middleware,
        ));

    let staff_api = Router::new()
        .route("/api/media", post(media::upload_media))
        .route("/api/banners", post(banner::create_banner))
        .route(
            "/api/banners/:id",
            put(banner::update_banner)
                .patch(banner::patch_banner)
                .delete(banner::delete_banner),
        )
        .route("/api/statistics", post(statistics::create_statistics))
        .route(
            "/api/statistics/:id",
            put(statistics::update_statistics)
                .patch(statistics::patch_statistics)
                .delete(statistics::delete_statistics),
        )
        .route("/api/useful-links", post(useful_link::create_link))
        .route(
            "/api/useful-links/:id",
            put(useful_link::update_link)
                .patch(useful_link::patch_link)
                .delete(useful_link::delete_link),
        )
        .route("/api/news", post(news::create_news))
        .route(
            "/api/news/:id",
            put(news::update_news)
                .patch(news::patch_news)
                .delete(news::delete_news),
        )
        .route("/api/about", post(about::create_about))
        .route(
            "/api/about/:id",
            put(about::update_about)
                .patch(about::patch_about)
                .delete(about::delete_about),
        )
        .route("/api/leadership", post(leadership::create_leader))
        .route(
            "/api/leadership/:id",
            put(leadership::update_leader)
                .patch(leadership::patch_leader)
                .delete(leadership::delete_leader),
        )
        .route("/api/vacancies", post(vacancy::create_vacancy))
        .route(
            "/api/vacancies/:id",
            put(vacancy::update_vacancy)
                .patch(vacancy::patch_vacancy)
                .delete(vacancy::delete_vacancy),
        )
        .route(
            "/api/interactive-services",
            post(interactive_service::create_service),
        )
        .route(
            "/api/interactive-services/:id",
            put(interactive_service::update_service)
                .patch(interactive_service::patch_service)
                .delete(interactive_service::delete_service),
        )
        .route("/api/decisions", post(decision::create_decision))
        .route(
            "/api/decisions/:id",
            put(decision::update_decision)
                .patch(decision::patch_decision)
                .delete(decision::delete_decision),
        )
        .route("/api/contacts", get(contact::list_contacts))
        .route(
            "/api/contacts/:id",
            get(contact::get_contact)
                .put(contact::update_contact)
                .patch(contact::patch_contact)
                .delete(contact::delete_contact),
        )
        .route(
            "/api/contacts/:id/mark_as_read",
            patch(contact::mark_as_read),
        )
        .merge(departments_staff)
        .merge(work_types_staff)
        .route_layer(from_fn_with_state(state.clone(), require_staff));

    let router = Router::new()
        .merge(public_api)
        .merge(throttled_api)
        .merge(staff_api)
        .nest_service(MEDIA_PREFIX, media_files(&state.config.media_root))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(uri: &str) -> String {
        request_key(
            &MediaBase(Some("http://localhost:8000".into())),
            &uri.parse::<Uri>().unwrap(),
        )
    }

    #[test]
    fn cache_key_ignores_unknown_parameters() {
        assert_eq!(key("/api/about?x=1"), key("/api/about"));
        assert_eq!(key("/api/about?x=1"), key("/api/about?x=2&y=3"));
        assert_ne!(key("/api/news?page=2"), key("/api/news"));
    }

    #[test]
    fn cache_key_is_order_independent() {
        assert_eq!(
            key("/api/news?search=suv&language=ru"),
            key("/api/news?language=ru&search=suv&utm=ads")
        );
        assert_eq!(
            key("/api/news?category=e&page=2"),
            "http://localhost:8000/api/news?category=e&page=2"
        );
    }
}
