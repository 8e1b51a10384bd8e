//! End-to-end: gateway page against a mock Connect credential endpoint.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

use probe_core::ConnectionSettings;
use probe_gateway::{build_probe_gateway_router, ProbeGatewayConfig};

const CREDENTIALS_PATH: &str = "/__api__/v1/oauth/integrations/credentials";

/// Mock Connect server: grants the viewer exchange, denies the content
/// exchange, and rejects the raw probe's empty-body POST the way a real
/// server rejects a missing grant.
async fn spawn_mock_connect_server() -> SocketAddr {
    let app = Router::new().route(
        CREDENTIALS_PATH,
        post(|body: Bytes| async move {
            let form = String::from_utf8_lossy(&body).to_string();
            if form.is_empty() {
                return (
                    StatusCode::UNAUTHORIZED,
                    json!({"error": "login required"}).to_string(),
                );
            }
            if form.contains("user-session-token") {
                return (
                    StatusCode::OK,
                    json!({"access_token": "viewer-credential", "token_type": "Bearer"})
                        .to_string(),
                );
            }
            (
                StatusCode::FORBIDDEN,
                json!({"error": "forbidden"}).to_string(),
            )
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });
    addr
}

async fn spawn_gateway_against(mock: SocketAddr) -> SocketAddr {
    let server_url = format!("http://{mock}");
    let mut platform_vars = BTreeMap::new();
    platform_vars.insert("CONNECT_SERVER".to_string(), server_url.clone());
    platform_vars.insert(
        "CONNECT_CONTENT_SESSION_TOKEN".to_string(),
        "content-session".to_string(),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind gateway");
    let addr = listener.local_addr().expect("gateway addr");
    let app = build_probe_gateway_router(ProbeGatewayConfig {
        bind: addr.to_string(),
        exchange_timeout_ms: 2_000,
        settings_override: Some(ConnectionSettings {
            server_url: Some(server_url),
            product: Some("CONNECT_CLOUD".to_string()),
            platform_vars,
        }),
    });
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve gateway");
    });
    addr
}

#[tokio::test]
async fn page_reports_mixed_exchange_outcomes_and_raw_result() {
    let mock = spawn_mock_connect_server().await;
    let gateway = spawn_gateway_against(mock).await;

    let page = reqwest::Client::new()
        .get(format!("http://{gateway}/"))
        .header(
            "Posit-Connect-User-Session-Token",
            "user-session-token-abcdefghijklmnop",
        )
        .send()
        .await
        .expect("page request")
        .text()
        .await
        .expect("page body");

    // Environment panel: named key in full, token var redacted.
    assert!(page.contains(&format!("CONNECT_SERVER = http://{mock}")));
    assert!(page.contains("CONNECT_CONTENT_SESSION_TOKEN"));

    // Credentials panel: viewer granted, content denied, both labeled.
    assert!(page.contains("User session token present: true"));
    assert!(page.contains("get_credentials() response:"));
    assert!(page.contains("viewer-credential"));
    assert!(page.contains("get_content_credentials() error: HttpStatus:"));
    assert!(page.contains("403"));

    // Raw panel: empty-body POST surfaced as an HTTP-level error with
    // the server's body, not a transport failure.
    assert!(page.contains(&format!("POST http://{mock}{CREDENTIALS_PATH}")));
    assert!(page.contains("HTTP Error: 401"));
    assert!(page.contains("login required"));
}

#[tokio::test]
async fn refresh_reruns_all_producers() {
    let mock = spawn_mock_connect_server().await;
    let gateway = spawn_gateway_against(mock).await;
    let client = reqwest::Client::new();

    let first = client
        .get(format!("http://{gateway}/"))
        .send()
        .await
        .expect("initial load")
        .text()
        .await
        .expect("body");
    assert!(first.contains("Refresh cycle: 0"));

    let second = client
        .post(format!("http://{gateway}/refresh"))
        .send()
        .await
        .expect("refresh")
        .text()
        .await
        .expect("body");
    assert!(second.contains("Refresh cycle: 1"));
    // The re-rendered page still carries live producer output.
    assert!(second.contains("<h3>Raw HTTP Test</h3>"));
    assert!(second.contains("HTTP Error: 401"));
}
