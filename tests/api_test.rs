//! End-to-end flows against PostgreSQL. Each test returns early when
//! `DATABASE_URL` is not set.

mod common;

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;
use uuid::Uuid;

use common::{app_with, authed, database, get, json_request, send, staff_token, test_config, App};

async fn setup() -> Option<(PgPool, App)> {
    let pool = database().await?;
    let app = app_with(pool.clone(), test_config("postgres://from-pool"));
    Some((pool, app))
}

fn unique(label: &str) -> String {
    format!("{} {}", label, &Uuid::new_v4().simple().to_string()[..8])
}

async fn create(app: &App, uri: &str, body: JsonValue) -> JsonValue {
    let token = staff_token();
    let (status, body) = send(app, json_request("POST", uri, &body, Some(&token))).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, body);
    body
}

fn news_body(title: &str) -> JsonValue {
    json!({
        "title": {"uz": title, "ru": "Новость"},
        "main_image": "news/cover.jpg",
        "category": {"uz": "Tadbirlar"},
        "minutes_to_read": 4,
        "content": {"uz": "Matn", "uz-cyrl": "Матн"}
    })
}

#[tokio::test]
async fn contact_submission_is_stored_even_when_notifier_is_down() {
    let Some((pool, _)) = setup().await else { return };
    let mut config = test_config("postgres://from-pool");
    config.telegram_bot_token = Some("123:abc".into());
    config.telegram_chat_id = Some("-1".into());
    config.telegram_api_base = "http://127.0.0.1:9".into();
    let app = app_with(pool.clone(), config);

    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let (status, body) = send(
        &app,
        json_request("POST", "/api/contacts", &json!({
            "full_name": "Ali",
            "phone_number": "+998901234567",
            "email": email,
            "message": "Salom"
        }), None),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"message": "Murojaatingiz qabul qilindi. Tez orada aloqaga chiqamiz."})
    );

    let is_read: bool = sqlx::query_scalar("SELECT is_read FROM contacts WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!is_read);
}

#[tokio::test]
async fn invalid_contact_leaves_no_row() {
    let Some((pool, app)) = setup().await else { return };
    let marker = unique("invalid");
    let (status, _) = send(
        &app,
        json_request("POST", "/api/contacts", &json!({
            "full_name": marker,
            "phone_number": "+998901234567",
            "email": "broken",
            "message": "Salom"
        }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE full_name = $1")
        .bind(&marker)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn staff_manage_contacts() {
    let Some((_, app)) = setup().await else { return };
    let token = staff_token();
    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let (status, _) = send(
        &app,
        json_request("POST", "/api/contacts", &json!({
            "full_name": "Vali",
            "phone_number": "+998907654321",
            "email": email,
            "message": "Suv yo'q"
        }), None),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, page) = send(&app, authed("GET", "/api/contacts?is_read=false", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let id = page["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == email.as_str())
        .map(|c| c["id"].as_i64().unwrap())
        .expect("submitted contact is listed");

    let (status, body) = send(
        &app,
        authed("PATCH", &format!("/api/contacts/{}/mark_as_read", id), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Murojaat o'qilgan deb belgilandi");

    let (_, contact) = send(&app, authed("GET", &format!("/api/contacts/{}", id), &token)).await;
    assert_eq!(contact["is_read"], true);

    let (status, _) = send(&app, authed("DELETE", &format!("/api/contacts/{}", id), &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, authed("GET", &format!("/api/contacts/{}", id), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn view_counts_grow_only_through_increment() {
    let Some((_, app)) = setup().await else { return };
    let news = create(&app, "/api/news", news_body(&unique("Nasos"))).await;
    let id = news["id"].as_i64().unwrap();
    assert_eq!(news["views_count"], 0);

    let mut last = 0;
    for _ in 0..3 {
        let (status, body) = send(&app, get(&format!("/api/news/{}/increment_views", id))).await;
        assert_eq!(status, StatusCode::OK);
        let views = body["views"].as_i64().unwrap();
        assert!(views > last);
        last = views;
    }
    assert!(last >= 3);

    let (_, first) = send(&app, get(&format!("/api/news/{}", id))).await;
    let (_, second) = send(&app, get(&format!("/api/news/{}", id))).await;
    assert_eq!(first["views_count"], last);
    assert_eq!(second["views_count"], last);

    let (status, _) = send(&app, get("/api/news/999999999/increment_views")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn news_language_falls_back_to_primary() {
    let Some((_, app)) = setup().await else { return };
    let title = unique("Yangi quduq");
    let news = create(&app, "/api/news", news_body(&title)).await;
    let id = news["id"].as_i64().unwrap();

    let (_, ru) = send(&app, get(&format!("/api/news/{}?language=ru", id))).await;
    assert_eq!(ru["translated_title"], "Новость");
    assert_eq!(ru["translated_content"], "Matn");
    assert_eq!(ru["translated_category"], "Tadbirlar");

    let (_, cyrl) = send(&app, get(&format!("/api/news/{}?language=uz-cyrl", id))).await;
    assert_eq!(cyrl["translated_title"], title.as_str());
    assert_eq!(cyrl["translated_content"], "Матн");

    let (_, uz) = send(&app, get(&format!("/api/news/{}?language=uz", id))).await;
    assert_eq!(uz["translated_title"], title.as_str());
}

#[tokio::test]
async fn same_title_news_get_distinct_slugs() {
    let Some((_, app)) = setup().await else { return };
    let title = unique("Suv tejash");
    let first = create(&app, "/api/news", news_body(&title)).await;
    let second = create(&app, "/api/news", news_body(&title)).await;
    assert_ne!(first["slug"], second["slug"]);
}

#[tokio::test]
async fn deleting_leadership_cascades_to_vacancies() {
    let Some((pool, app)) = setup().await else { return };
    let token = staff_token();

    let leader = create(&app, "/api/leadership", json!({
        "full_name": {"uz": unique("Aliyev Vali")},
        "position": {"uz": "Boshliq"},
        "reception_time": {"uz": "Dushanba 10:00"},
        "phone_number": "+998712000000",
        "about": {"uz": "Tajriba"},
        "labor_activity": {"uz": "2010-2026"}
    }))
    .await;
    let department = create(&app, "/api/departments", json!({"title": {"uz": "Moliya"}})).await;
    let work_type = create(&app, "/api/work-types", json!({"title": {"uz": "To'liq stavka"}})).await;

    let vacancy = create(&app, "/api/vacancies", json!({
        "title": {"uz": unique("Buxgalter")},
        "leadership": leader["id"],
        "department": department["id"],
        "location": {"uz": "Toshkent"},
        "type_of_work": work_type["id"],
        "description": {"uz": "Talablar"}
    }))
    .await;
    assert_eq!(vacancy["department_name"], "Moliya");
    assert_eq!(vacancy["type_of_work_name"], "To'liq stavka");

    let (status, _) = send(
        &app,
        authed("DELETE", &format!("/api/leadership/{}", leader["id"]), &token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_vacancies WHERE leadership_id = $1")
        .bind(leader["id"].as_i64().unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    let (status, _) = send(&app, get(&format!("/api/vacancies/{}", vacancy["id"]))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_foreign_key_is_a_bad_request() {
    let Some((_, app)) = setup().await else { return };
    let token = staff_token();
    let (status, _) = send(
        &app,
        json_request("POST", "/api/vacancies", &json!({
            "title": {"uz": unique("Muhandis")},
            "leadership": 999999999,
            "department": 999999999,
            "location": {"uz": "Nukus"},
            "type_of_work": 999999999,
            "description": {"uz": "Talablar"}
        }), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn banner_crud_with_trailing_slashes() {
    let Some((_, app)) = setup().await else { return };
    let token = staff_token();

    let banner = create(&app, "/api/banners/", json!({
        "title": {"uz": unique("Bahor")},
        "image": "banners/spring.png"
    }))
    .await;
    let id = banner["id"].as_i64().unwrap();
    assert!(banner["image"].as_str().unwrap().ends_with("/media/banners/spring.png"));

    let (status, patched) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/banners/{}/", id),
            &json!({"title": {"ru": "Весна"}}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"]["ru"], "Весна");
    assert_eq!(patched["title"]["uz"], banner["title"]["uz"]);

    let (status, listing) = send(&app, get("/api/banners/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(listing["count"].as_i64().unwrap() >= 1);
    assert!(listing["results"].is_array());

    let (status, _) = send(&app, authed("DELETE", &format!("/api/banners/{}", id), &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, get(&format!("/api/banners/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_past_the_end_is_not_found() {
    let Some((_, app)) = setup().await else { return };
    let (status, body) = send(&app, get("/api/decisions?page=100000")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid page.");

    let (status, body) = send(&app, get("/api/news?page=9223372036854775807")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid page.");
}

#[tokio::test]
async fn decisions_and_services_count_views() {
    let Some((_, app)) = setup().await else { return };
    let decision = create(&app, "/api/decisions", json!({
        "title": {"uz": unique("Qaror")},
        "content": {"uz": "Matn"}
    }))
    .await;
    let service = create(&app, "/api/interactive-services", json!({
        "title": {"uz": unique("Onlayn ariza")},
        "about": {"uz": "Tavsif"}
    }))
    .await;

    let (_, body) = send(
        &app,
        get(&format!("/api/decisions/{}/increment_views", decision["id"])),
    )
    .await;
    assert_eq!(body["views"], 1);
    let (_, body) = send(
        &app,
        get(&format!("/api/interactive-services/{}/increment_views", service["id"])),
    )
    .await;
    assert_eq!(body["views"], 1);
}

#[tokio::test]
async fn per_ip_limit_stops_repeat_views() {
    let Some(pool) = database().await else { return };
    let mut config = test_config("postgres://from-pool");
    config.view_hits_per_ip_limit = 1;
    let app = app_with(pool, config);

    let news = create(&app, "/api/news", news_body(&unique("Kanal"))).await;
    let uri = format!("/api/news/{}/increment_views", news["id"]);
    let from = |addr: &str| {
        let mut request = get(&uri);
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>(addr.parse().unwrap()));
        request
    };

    let (_, body) = send(&app, from("203.0.113.7:40000")).await;
    assert_eq!(body["views"], 1);
    let (status, body) = send(&app, from("203.0.113.7:40001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["views"], 1);

    let (_, body) = send(&app, from("203.0.113.8:40000")).await;
    assert_eq!(body["views"], 2);
}

#[tokio::test]
async fn writes_refresh_cached_lists() {
    let Some(pool) = database().await else { return };
    let mut config = test_config("postgres://from-pool");
    config.cache_enabled = true;
    let app = app_with(pool, config);

    let marker = Uuid::new_v4().simple().to_string();
    let uri = format!("/api/banners?search={}", marker);
    let (status, before) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["count"], 0);

    create(&app, "/api/banners", json!({
        "title": {"uz": format!("Banner {}", marker)},
        "image": "banners/cache.png"
    }))
    .await;

    let (_, after) = send(&app, get(&uri)).await;
    assert_eq!(after["count"], 1);
    assert_eq!(after["results"][0]["title"]["uz"], format!("Banner {}", marker));
}
