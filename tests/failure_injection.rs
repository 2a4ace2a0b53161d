//! Failure injection tests for the upstream call in both fallback modes.

use std::time::Duration;

use serde_json::{json, Value};
use vehicle_lookup::config::FallbackMode;

mod common;

async fn lookup(service: &common::TestService) -> (u16, Value) {
    let res = reqwest::Client::new()
        .get(service.url("/lookup"))
        .query(&[("reg", "AB12 CDE")])
        .send()
        .await
        .expect("service unreachable");
    let status = res.status().as_u16();
    (status, res.json().await.expect("JSON body"))
}

fn assert_fallback(body: &Value) {
    assert_eq!(body["status"], "FALLBACK_ACTIVE");
    assert_eq!(body["reg"], "AB12CDE");
    assert!(body["make"].is_null());
    assert!(body["year"].is_null());
    assert!(body["note"].is_string());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upstream_server_error_degrades() {
    let endpoint =
        common::start_programmable_backend(|| async { (500, r#"{"errors":[]}"#.into()) }).await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Tolerant,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 200);
    assert_fallback(&body);
    assert_eq!(body["error"], "DVLA returned HTTP 500");
}

#[tokio::test]
async fn test_vehicle_not_found_degrades() {
    let endpoint =
        common::start_programmable_backend(|| async { (404, r#"{"errors":[]}"#.into()) }).await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Tolerant,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 200);
    assert_fallback(&body);
    assert_eq!(body["error"], "DVLA returned HTTP 404");
}

#[tokio::test]
async fn test_malformed_body_degrades() {
    let endpoint = common::start_programmable_backend(|| async { (200, "not json".into()) }).await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Tolerant,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 200);
    assert_fallback(&body);
    assert!(body["error"].as_str().unwrap().contains("malformed"));
}

#[tokio::test]
async fn test_non_object_body_degrades() {
    let endpoint = common::start_programmable_backend(|| async { (200, "[1,2,3]".into()) }).await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Tolerant,
    ))
    .await;

    let (_, body) = lookup(&service).await;
    assert_fallback(&body);
    assert_eq!(
        body["error"],
        "DVLA returned a malformed body: expected a JSON object"
    );
}

#[tokio::test]
async fn test_upstream_timeout_degrades() {
    let endpoint = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, json!({ "make": "FORD" }).to_string())
    })
    .await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Tolerant,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 200);
    assert_fallback(&body);
    assert_eq!(body["error"], "DVLA request timed out after 1 seconds");
}

#[tokio::test]
async fn test_connection_refused_degrades() {
    let endpoint = format!("http://{}/vehicles", common::unused_addr().await);
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Tolerant,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 200);
    assert_fallback(&body);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("DVLA request failed"));
}

#[tokio::test]
async fn test_strict_missing_credential_is_503() {
    let endpoint = format!("http://{}/vehicles", common::unused_addr().await);
    let service =
        common::spawn_service(common::config_for(&endpoint, None, FallbackMode::Strict)).await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 503);
    assert_eq!(body, json!({ "error": "DVLA_X_API_KEY not set" }));
}

#[tokio::test]
async fn test_strict_upstream_error_is_502() {
    let endpoint =
        common::start_programmable_backend(|| async { (503, "{}".into()) }).await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Strict,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 502);
    assert_eq!(body, json!({ "error": "DVLA returned HTTP 503" }));
}

#[tokio::test]
async fn test_strict_timeout_is_504() {
    let endpoint = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, "{}".into())
    })
    .await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Strict,
    ))
    .await;

    let (status, _) = lookup(&service).await;
    assert_eq!(status, 504);
}

#[tokio::test]
async fn test_strict_success_unchanged() {
    let endpoint = common::start_programmable_backend(|| async {
        (200, json!({ "make": "FORD", "taxStatus": "Taxed" }).to_string())
    })
    .await;
    let service = common::spawn_service(common::config_for(
        &endpoint,
        Some("test-key"),
        FallbackMode::Strict,
    ))
    .await;

    let (status, body) = lookup(&service).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "DVLA_OK");
    assert_eq!(body["tax_status"], "Taxed");
}
