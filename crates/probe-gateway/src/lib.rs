//! HTTP surface for the credential diagnostics page.
//!
//! Serves one page with three verbatim report panels and a refresh
//! control. Every render is a fresh diagnostic cycle; a failure inside
//! any producer becomes report text, never an HTTP error.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use probe_connect::{ConnectClient, CredentialExchange};
use probe_core::ConnectionSettings;
use probe_diagnostics::{
    collect_credentials_report, collect_environment_report, collect_raw_http_report,
    RefreshSignal,
};

mod diagnostics_page;

use diagnostics_page::render_diagnostics_page;

pub const DIAGNOSTICS_PAGE_ENDPOINT: &str = "/";
pub const REFRESH_ENDPOINT: &str = "/refresh";

#[derive(Debug, Clone)]
/// Runtime configuration for the probe gateway.
pub struct ProbeGatewayConfig {
    pub bind: String,
    /// Timeout applied to credential-exchange calls. Zero means none;
    /// the raw probe keeps its own fixed timeout either way.
    pub exchange_timeout_ms: u64,
    /// Fixed settings snapshot instead of reading the process
    /// environment each cycle. Test seam.
    pub settings_override: Option<ConnectionSettings>,
}

impl Default for ProbeGatewayConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            exchange_timeout_ms: 0,
            settings_override: None,
        }
    }
}

#[derive(Clone)]
struct ProbeGatewayState {
    config: ProbeGatewayConfig,
    refresh: Arc<RefreshSignal>,
}

pub fn build_probe_gateway_router(config: ProbeGatewayConfig) -> Router {
    let state = ProbeGatewayState {
        config,
        refresh: Arc::new(RefreshSignal::new()),
    };
    Router::new()
        .route(DIAGNOSTICS_PAGE_ENDPOINT, get(handle_diagnostics_page))
        .route(REFRESH_ENDPOINT, post(handle_refresh))
        .with_state(state)
}

async fn handle_diagnostics_page(
    State(state): State<ProbeGatewayState>,
    headers: HeaderMap,
) -> Html<String> {
    let settings = state
        .config
        .settings_override
        .clone()
        .unwrap_or_else(ConnectionSettings::from_env);

    let environment_report = collect_environment_report(&settings);

    let client_result = ConnectClient::from_settings(&settings, state.config.exchange_timeout_ms)
        .map(|client| Arc::new(client) as Arc<dyn CredentialExchange>);

    // The producers share no state; run the two network-touching ones
    // together.
    let (credentials_report, raw_http_report) = tokio::join!(
        collect_credentials_report(&headers, client_result),
        collect_raw_http_report(settings.server_url.as_deref()),
    );

    let cycle = state.refresh.current();
    tracing::debug!(cycle, "rendered diagnostics page");
    Html(render_diagnostics_page(
        cycle,
        &environment_report,
        &credentials_report,
        &raw_http_report,
    ))
}

async fn handle_refresh(State(state): State<ProbeGatewayState>) -> Redirect {
    let cycle = state.refresh.fire();
    tracing::info!(cycle, "refresh triggered");
    Redirect::to(DIAGNOSTICS_PAGE_ENDPOINT)
}

/// Binds and runs the gateway until ctrl-c.
pub async fn run_probe_gateway_server(config: ProbeGatewayConfig) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind probe gateway on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound gateway address")?;
    tracing::info!(%local_addr, "probe gateway listening");

    let app = build_probe_gateway_router(config);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("probe gateway exited unexpectedly")
}
