//! Raw HTTP probe report.
//!
//! Re-issues the credential POST without the Connect client so an
//! operator can tell client-layer failures from transport or server
//! failures. Single attempt per cycle, fixed timeout, no retries.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use probe_connect::OAUTH_CREDENTIALS_PATH;

pub const RAW_PROBE_TIMEOUT_MS: u64 = 5_000;
pub const RAW_PROBE_SKIP_MESSAGE: &str = "CONNECT_SERVER not set - cannot make raw HTTP request";

const NO_BODY_PLACEHOLDER: &str = "<no body>";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one transport-level credential probe.
pub enum RawProbeOutcome {
    Response {
        status: u16,
        headers: BTreeMap<String, String>,
        body: String,
    },
    HttpError {
        status: u16,
        body: String,
    },
    Transport {
        kind: String,
        message: String,
    },
    Skipped {
        reason: String,
    },
}

/// Produces the raw probe report for one cycle.
pub async fn collect_raw_http_report(server_url: Option<&str>) -> String {
    let server_url = match server_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url,
        None => {
            return render_raw_probe_report(
                None,
                &RawProbeOutcome::Skipped {
                    reason: RAW_PROBE_SKIP_MESSAGE.to_string(),
                },
            )
        }
    };

    let url = format!("{server_url}{OAUTH_CREDENTIALS_PATH}");
    let outcome = run_raw_http_probe(&url).await;
    render_raw_probe_report(Some(&url), &outcome)
}

/// Renders one probe outcome. A skipped probe renders only its reason;
/// everything else is prefixed with the attempted request line.
pub fn render_raw_probe_report(url: Option<&str>, outcome: &RawProbeOutcome) -> String {
    let mut lines = Vec::new();
    if let Some(url) = url {
        lines.push(format!("POST {url}"));
        lines.push(String::new());
    }
    match outcome {
        RawProbeOutcome::Response {
            status,
            headers,
            body,
        } => {
            let headers_json =
                serde_json::to_string(headers).unwrap_or_else(|_| format!("{headers:?}"));
            lines.push(format!("Status: {status}"));
            lines.push(format!("Headers: {headers_json}"));
            lines.push(format!("Body: {body}"));
        }
        RawProbeOutcome::HttpError { status, body } => {
            lines.push(format!("HTTP Error: {status}"));
            lines.push(format!("Body: {body}"));
        }
        RawProbeOutcome::Transport { kind, message } => {
            lines.push(format!("Error: {kind}: {message}"));
        }
        RawProbeOutcome::Skipped { reason } => {
            lines.push(reason.clone());
        }
    }
    lines.join("\n")
}

/// Issues the probe request against an already-built URL.
pub async fn run_raw_http_probe(url: &str) -> RawProbeOutcome {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_millis(RAW_PROBE_TIMEOUT_MS))
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            return RawProbeOutcome::Transport {
                kind: classify_transport_error(&error).to_string(),
                message: error.to_string(),
            }
        }
    };

    let response = match client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
    {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(url, error = %error, "raw credential probe transport failure");
            return RawProbeOutcome::Transport {
                kind: classify_transport_error(&error).to_string(),
                message: error.to_string(),
            };
        }
    };

    let status = response.status();
    if status.is_success() {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("<non-utf8 value>").to_string(),
                )
            })
            .collect::<BTreeMap<_, _>>();
        let body = response.text().await.unwrap_or_default();
        return RawProbeOutcome::Response {
            status: status.as_u16(),
            headers,
            body,
        };
    }

    let body = response
        .text()
        .await
        .ok()
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| NO_BODY_PLACEHOLDER.to_string());
    RawProbeOutcome::HttpError {
        status: status.as_u16(),
        body,
    }
}

fn classify_transport_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_builder() {
        "builder"
    } else {
        "request"
    }
}
