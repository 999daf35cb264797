// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    mount_stats_page, source_settings, telegram_settings, RecordingEmail, COUNTERS_PAGE, FULL_PAGE,
};
use statwatch::domain::services::delivery_service::{
    ChatSender, DeliveryDispatcher, EmailEnvelope, EmailSender,
};
use statwatch::domain::services::extraction_service::ExtractionService;
use statwatch::engines::reqwest_engine::ReqwestFetcher;
use statwatch::infrastructure::notifiers::TelegramChatSender;
use statwatch::utils::errors::{DeliveryError, FetchError, PipelineError};
use statwatch::workers::report_worker::ReportWorker;
use statwatch::workers::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(recipients: &[&str]) -> EmailEnvelope {
    EmailEnvelope {
        recipients: recipients.iter().map(|r| r.to_string()).collect(),
        subject: "COVID-19 Report For Now".to_string(),
        from_label: "COVID-19-Reporter".to_string(),
    }
}

fn report_worker(
    server: &MockServer,
    dispatcher: DeliveryDispatcher,
    country: &str,
    shutdown: watch::Receiver<bool>,
) -> ReportWorker {
    let settings = source_settings(server);
    ReportWorker::new(
        Arc::new(ReqwestFetcher::new(&settings).unwrap()),
        ExtractionService::new().unwrap(),
        dispatcher,
        settings.url,
        country.to_string(),
        Duration::from_secs(3600),
        shutdown,
    )
}

#[tokio::test]
async fn test_counters_only_page_produces_common_section() {
    let server = MockServer::start().await;
    mount_stats_page(&server, COUNTERS_PAGE).await;

    let email = Arc::new(RecordingEmail::default());
    let dispatcher = DeliveryDispatcher::new(
        Some(email.clone() as Arc<dyn EmailSender>),
        None,
        envelope(&["ops@example.com"]),
    );
    let (_tx, rx) = watch::channel(false);
    let worker = report_worker(&server, dispatcher, "", rx);

    let report = worker.run_cycle().await.unwrap();

    assert_eq!(report.body(), "Common:\n\n- Cases 1234\n- Deaths 56");
    let sent = email.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ops@example.com");
    assert_eq!(sent[0].from_label, "COVID-19-Reporter");
    assert_eq!(sent[0].body, "Common:\n\n- Cases 1234\n- Deaths 56");
}

#[tokio::test]
async fn test_country_section_and_chat_delivery() {
    let server = MockServer::start().await;
    mount_stats_page(&server, FULL_PAGE).await;

    let expected = "Common:\n\n\
        - Coronavirus Cases: 1234\n\
        - Deaths: 56\n\
        - Recovered: 789\n\n\
        For country - italy\n\n\
        - Total Cases: 12462\n\
        - New Cases: -";

    Mock::given(method("GET"))
        .and(path("/botTEST_TOKEN/sendMessage"))
        .and(wiremock::matchers::query_param("text", expected))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let chat = TelegramChatSender::from_settings(&telegram_settings(&server.uri()))
        .unwrap()
        .unwrap();
    let email = Arc::new(RecordingEmail::default());
    let dispatcher = DeliveryDispatcher::new(
        Some(email.clone() as Arc<dyn EmailSender>),
        Some(Arc::new(chat) as Arc<dyn ChatSender>),
        envelope(&["a@example.com", "b@example.com"]),
    );
    let (_tx, rx) = watch::channel(false);
    let worker = report_worker(&server, dispatcher, "italy", rx);

    let report = worker.run_cycle().await.unwrap();

    assert_eq!(report.body(), expected);
    assert_eq!(email.sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_chat_failure_does_not_end_cycle() {
    let server = MockServer::start().await;
    mount_stats_page(&server, COUNTERS_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/botTEST_TOKEN/sendMessage"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let chat = TelegramChatSender::from_settings(&telegram_settings(&server.uri()))
        .unwrap()
        .unwrap();
    let dispatcher = DeliveryDispatcher::new(
        None,
        Some(Arc::new(chat) as Arc<dyn ChatSender>),
        envelope(&[]),
    );
    let (_tx, rx) = watch::channel(false);
    let worker = report_worker(&server, dispatcher, "", rx);

    assert!(worker.run_cycle().await.is_ok());
}

#[tokio::test]
async fn test_unreachable_page_ends_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let email = Arc::new(RecordingEmail::default());
    let dispatcher = DeliveryDispatcher::new(
        Some(email.clone() as Arc<dyn EmailSender>),
        None,
        envelope(&["ops@example.com"]),
    );
    let (_tx, rx) = watch::channel(false);
    let worker = report_worker(&server, dispatcher, "", rx);

    match worker.run().await {
        Err(PipelineError::Fetch(FetchError::Status { status, .. })) => assert_eq!(status, 404),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(email.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_email_failure_ends_run() {
    let server = MockServer::start().await;
    mount_stats_page(&server, COUNTERS_PAGE).await;

    let email = Arc::new(RecordingEmail {
        fail: true,
        ..Default::default()
    });
    let dispatcher = DeliveryDispatcher::new(
        Some(email as Arc<dyn EmailSender>),
        None,
        envelope(&["ops@example.com"]),
    );
    let (_tx, rx) = watch::channel(false);
    let worker = report_worker(&server, dispatcher, "", rx);

    assert!(matches!(
        worker.run().await,
        Err(PipelineError::Delivery(DeliveryError::Send { .. }))
    ));
}

#[tokio::test]
async fn test_shutdown_stops_polling_after_first_cycle() {
    let server = MockServer::start().await;
    mount_stats_page(&server, COUNTERS_PAGE).await;

    let email = Arc::new(RecordingEmail::default());
    let dispatcher = DeliveryDispatcher::new(
        Some(email.clone() as Arc<dyn EmailSender>),
        None,
        envelope(&["ops@example.com"]),
    );
    let (tx, rx) = watch::channel(false);
    let worker = report_worker(&server, dispatcher, "", rx);

    let handle = tokio::spawn(async move { worker.run().await });
    while email.sent.lock().unwrap().is_empty() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tx.send(true).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker did not stop")
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(email.sent.lock().unwrap().len(), 1);
}
