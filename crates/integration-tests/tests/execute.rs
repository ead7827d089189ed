//! Execute end-to-end tests
//!
//! Real reqwest transport against a local wiremock server.

use httpcheck_core::domain::{ProbeConfig, Severity, TargetServer};
use httpcheck_core::port::TransportError;
use httpcheck_integration_tests::{authority, closed_port, task, xml_file};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> httpcheck_core::domain::ProbeConfigBuilder {
    ProbeConfig::builder(TargetServer::new(authority(&server.uri())))
}

#[tokio::test]
async fn test_good_even_though_status_code_is_not_success() {
    let server = server_with(404, "not found").await;

    let outcome = task(config_for(&server).path("not existing").build().unwrap())
        .execute()
        .await
        .unwrap();

    assert!(!outcome.is_empty());
    assert!(outcome.all_good());
    assert!(outcome.messages()[0].contains("404 Not Found"));
}

#[tokio::test]
async fn test_alert_when_expected_status_code_does_not_match() {
    let server = server_with(404, "not found").await;

    let outcome = task(
        config_for(&server)
            .path("not existing")
            .expect_success_status_code()
            .build()
            .unwrap(),
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(outcome.severities(), vec![Severity::Alert]);
    assert!(outcome.messages()[0].contains("with invalid status code 404 Not Found"));
}

#[tokio::test]
async fn test_good_when_status_code_matches() {
    let server = server_with(200, "alive").await;

    let outcome = task(
        config_for(&server)
            .expect_success_status_code()
            .build()
            .unwrap(),
    )
    .execute()
    .await
    .unwrap();

    assert!(!outcome.is_empty());
    assert!(outcome.all_good());
}

#[tokio::test]
async fn test_warns_when_content_contains_invalid_words() {
    let server = server_with(200, "<html><body>Welcome</body></html>").await;

    let outcome = task(config_for(&server).invalid_words_are(["html"]).build().unwrap())
        .execute()
        .await
        .unwrap();

    assert_eq!(outcome.severities(), vec![Severity::Good, Severity::Alert]);
    assert!(outcome.messages().iter().any(|m| m.contains("html")));
}

#[tokio::test]
async fn test_clean_content_adds_nothing() {
    let server = server_with(200, "all systems nominal").await;

    let outcome = task(
        config_for(&server)
            .invalid_words_are(["Exception", "error"])
            .build()
            .unwrap(),
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(outcome.severities(), vec![Severity::Good]);
}

#[tokio::test]
async fn test_status_mismatch_skips_content_scan() {
    let server = server_with(500, "Exception in handler").await;

    let outcome = task(
        config_for(&server)
            .expect_success_status_code()
            .invalid_words_are(["Exception"])
            .build()
            .unwrap(),
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(outcome.severities(), vec![Severity::Alert]);
}

#[tokio::test]
async fn test_requests_path_from_file_uri_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/withPath"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let file = xml_file(&format!(
        r#"<config><target Uri="{}/ignored" /></config>"#,
        server.uri()
    ));

    let outcome = task(
        ProbeConfig::builder(TargetServer::new("invalid host name"))
            .base_uri_in_file(file.path(), "/config/target/@Uri")
            .path("withPath")
            .expect_success_status_code()
            .build()
            .unwrap(),
    )
    .execute()
    .await
    .unwrap();

    assert!(outcome.all_good(), "{:?}", outcome);
}

#[tokio::test]
async fn test_resolution_failure_makes_no_request() {
    let dir = tempfile::tempdir().unwrap();

    let outcome = task(
        ProbeConfig::builder(TargetServer::new("test"))
            .base_uri_in_file(dir.path().join("missing.xml"), "/a/@b")
            .build()
            .unwrap(),
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(outcome.severities(), vec![Severity::Alert]);
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    let host = format!("127.0.0.1:{}", closed_port());

    let result = task(ProbeConfig::builder(TargetServer::new(host)).build().unwrap())
        .execute()
        .await;

    assert!(
        matches!(result, Err(TransportError::Connect { .. })),
        "Expected a transport fault, got {:?}",
        result
    );
}
