//! Binary entry point for the Connect OAuth credential probe.

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use probe_gateway::{run_probe_gateway_server, ProbeGatewayConfig};

#[derive(Debug, Parser)]
#[command(
    name = "oauth-probe",
    about = "Diagnostic page verifying platform-injected connection config and OAuth credential exchange"
)]
struct Cli {
    /// Address the diagnostics page binds to.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Optional timeout for credential-exchange calls, in milliseconds.
    /// Zero leaves them unbounded; the raw probe always keeps its own
    /// fixed 5-second timeout.
    #[arg(long, default_value_t = 0)]
    request_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    run_probe_gateway_server(ProbeGatewayConfig {
        bind: cli.bind,
        exchange_timeout_ms: cli.request_timeout_ms,
        settings_override: None,
    })
    .await
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
