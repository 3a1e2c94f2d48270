use std::time::Duration;

use serde_json::json;
use watcher_engine::{ClientSettings, FailureKind, JobStatus, ReqwestStatusSource, StatusSource};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source() -> ReqwestStatusSource {
    ReqwestStatusSource::new(ClientSettings::default()).expect("client")
}

#[tokio::test]
async fn status_is_fetched_with_auth_header_and_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_progress/abc/"))
        .and(header("X-CSRFToken", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "PROGRESS",
            "details": {"step": 5, "total": 20, "logs": "working"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/get_progress/abc/", server.uri());
    let status = source().fetch_status(&url, "tok").await.expect("status");

    assert_eq!(
        status,
        JobStatus::InProgress {
            current_step: 5,
            total_steps: 20,
            log_text: "working".to_string(),
        }
    );
}

#[tokio::test]
async fn log_url_uses_its_own_header_spelling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_task_log/abc/"))
        .and(header("X-CSRFRToken", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("https://files/abc.log"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/get_task_log/abc/", server.uri());
    let log_url = source().fetch_log_url(&url, "tok").await.expect("log url");
    assert_eq!(log_url, "https://files/abc.log");
}

#[tokio::test]
async fn log_url_accepts_json_string_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/log"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("https://files/x.log")))
        .mount(&server)
        .await;

    let url = format!("{}/log", server.uri());
    let log_url = source().fetch_log_url(&url, "").await.expect("log url");
    assert_eq!(log_url, "https://files/x.log");
}

#[tokio::test]
async fn non_success_status_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let url = format!("{}/status", server.uri());
    let err = source().fetch_status(&url, "tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(403));
}

#[tokio::test]
async fn garbage_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let url = format!("{}/status", server.uri());
    let err = source().fetch_status(&url, "tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_status_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"state": "PENDING"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let source = ReqwestStatusSource::new(settings).expect("client");
    let url = format!("{}/slow", server.uri());

    let err = source.fetch_status(&url, "tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_status_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_body_bytes: 16,
        ..ClientSettings::default()
    };
    let source = ReqwestStatusSource::new(settings).expect("client");
    let url = format!("{}/large", server.uri());

    let err = source.fetch_status(&url, "tok").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            actual: Some(64)
        }
    );
}

#[tokio::test]
async fn malformed_url_is_rejected_before_sending() {
    let err = source().fetch_status("not a url", "tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[test]
fn invalid_header_name_is_rejected() {
    let settings = ClientSettings {
        status_auth_header: "bad header".to_string(),
        ..ClientSettings::default()
    };
    let err = ReqwestStatusSource::new(settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidHeader);
}
