mod common;

use chrono::Utc;
use serde_json::json;
use suv_cms_backend::models::contact::Contact;
use suv_cms_backend::services::notification_service::NotificationService;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::test_config;

fn contact() -> Contact {
    Contact {
        id: 7,
        full_name: "Ali".into(),
        phone_number: "+998901234567".into(),
        email: "ali@example.com".into(),
        message: "Salom".into(),
        is_read: false,
        created_date: Utc::now(),
        updated_date: Utc::now(),
    }
}

fn notifier(api_base: &str, configured: bool) -> NotificationService {
    let mut config = test_config("postgres://unused");
    config.telegram_api_base = api_base.to_string();
    if configured {
        config.telegram_bot_token = Some("123:abc".into());
        config.telegram_chat_id = Some("-100500".into());
    }
    NotificationService::new(&config).unwrap()
}

#[tokio::test]
async fn posts_html_message_to_configured_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({"chat_id": "-100500", "parse_mode": "HTML"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let sent = notifier(&server.uri(), true)
        .send_contact(&contact())
        .await
        .unwrap();
    assert!(sent);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let notifier = notifier(&server.uri(), true);
    assert!(notifier.send_contact(&contact()).await.is_err());
    // the best-effort wrapper swallows the same failure
    notifier.notify_contact(&contact()).await;
}

#[tokio::test]
async fn unconfigured_bot_skips_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sent = notifier(&server.uri(), false)
        .send_contact(&contact())
        .await
        .unwrap();
    assert!(!sent);
}
