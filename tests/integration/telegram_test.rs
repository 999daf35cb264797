// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::telegram_settings;
use serde_json::json;
use statwatch::domain::services::delivery_service::ChatSender;
use statwatch::infrastructure::notifiers::TelegramChatSender;
use statwatch::utils::errors::DeliveryError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_PATH: &str = "/botTEST_TOKEN/sendMessage";

#[tokio::test]
async fn test_send_message_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEND_PATH))
        .and(query_param("chat_id", "42"))
        .and(query_param("text", "Common:\n\n- Cases 1234"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true, "result": { "message_id": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sender = TelegramChatSender::from_settings(&telegram_settings(&server.uri()))
        .unwrap()
        .expect("credentials are configured");

    sender.send_message("Common:\n\n- Cases 1234").await.unwrap();
    assert_eq!(sender.channel_id(), "42");
}

#[tokio::test]
async fn test_trailing_slash_in_api_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let sender = TelegramChatSender::from_settings(&telegram_settings(&format!("{}/", server.uri())))
        .unwrap()
        .unwrap();

    sender.send_message("hello").await.unwrap();
}

#[tokio::test]
async fn test_http_error_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let sender = TelegramChatSender::from_settings(&telegram_settings(&server.uri()))
        .unwrap()
        .unwrap();

    let err = sender.send_message("hello").await.unwrap_err();
    assert!(matches!(err, DeliveryError::Rejected { .. }));
}

#[tokio::test]
async fn test_api_refusal_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let sender = TelegramChatSender::from_settings(&telegram_settings(&server.uri()))
        .unwrap()
        .unwrap();

    match sender.send_message("hello").await {
        Err(DeliveryError::Rejected { reason, .. }) => {
            assert_eq!(reason, "Bad Request: chat not found")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_error_hides_token() {
    let sender = TelegramChatSender::from_settings(&telegram_settings("http://127.0.0.1:9"))
        .unwrap()
        .unwrap();

    match sender.send_message("hello").await {
        Err(DeliveryError::Send { reason, .. }) => assert!(!reason.contains("TEST_TOKEN")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_missing_credentials_disable_chat() {
    let mut settings = telegram_settings("https://api.telegram.org");
    settings.chat_id = None;
    assert!(TelegramChatSender::from_settings(&settings).unwrap().is_none());

    let mut settings = telegram_settings("https://api.telegram.org");
    settings.token = Some("  ".to_string());
    assert!(TelegramChatSender::from_settings(&settings).unwrap().is_none());
}

#[test]
fn test_bare_proxy_address_is_accepted() {
    let mut settings = telegram_settings("https://api.telegram.org");
    settings.proxy_url = Some("127.0.0.1:1080".to_string());

    assert!(TelegramChatSender::from_settings(&settings).unwrap().is_some());
}

#[test]
fn test_invalid_proxy_is_transport_error() {
    let mut settings = telegram_settings("https://api.telegram.org");
    settings.proxy_url = Some("http://[::1".to_string());

    assert!(matches!(
        TelegramChatSender::from_settings(&settings),
        Err(DeliveryError::Transport(_))
    ));
}
