//! End-to-end tests for the availability endpoint.

use reqwest::StatusCode;
use serde_json::Value;

mod common;

async fn query(addr: std::net::SocketAddr, value: &str) -> reqwest::Response {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    client
        .get(format!("http://{}/availability/{}", addr, value))
        .send()
        .await
        .expect("service unreachable")
}

#[tokio::test]
async fn test_xbox_is_available() {
    let (addr, shutdown) = common::spawn_service().await;

    let res = query(addr, "xbox").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["console"], "xbox");
    assert_eq!(body["available"], true);

    shutdown.trigger();
}

#[tokio::test]
async fn test_switch_and_wii_are_out_of_stock() {
    let (addr, shutdown) = common::spawn_service().await;

    for console in ["switch", "wii"] {
        let res = query(addr, console).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["console"], console);
        assert_eq!(body["available"], false);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_ps5_faults_with_server_error() {
    let (addr, shutdown) = common::spawn_service().await;

    let res = query(addr, "ps5").await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "simulated_outage");
    assert!(body["message"].as_str().unwrap().contains("ps5"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_console_is_a_client_error() {
    let (addr, shutdown) = common::spawn_service().await;

    for raw in ["dreamcast", "PS5", "xbox360"] {
        let res = query(addr, raw).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "input {:?}", raw);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_console");
        // The raw input never echoes back through the fault body.
        assert!(!body["message"].as_str().unwrap().contains(raw));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_ps5_faults_deterministically() {
    let (addr, shutdown) = common::spawn_service().await;

    for _ in 0..10 {
        let res = query(addr, "ps5").await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_probe() {
    let (addr, shutdown) = common::spawn_service().await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");

    shutdown.trigger();
}
