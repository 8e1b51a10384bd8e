//! Credential-exchange probe report.
//!
//! Exercises the Connect client end to end: session token extraction,
//! header dump, client construction, then the viewer and content
//! exchanges. Each step is fault-isolated; only a construction failure
//! short-circuits the rest of this report.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use serde_json::Value;

use probe_connect::{error_chain_lines, ConnectError, CredentialExchange};
use probe_core::redact;

use crate::HEADER_VALUE_REDACT_CHARS;

/// Header carrying the end-user session token on inbound requests.
pub const SESSION_TOKEN_HEADER: &str = "Posit-Connect-User-Session-Token";
/// Number of leading token characters that may appear in a report.
pub const SESSION_TOKEN_PREFIX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one credential-exchange attempt.
pub enum CredentialOutcome {
    Granted(Value),
    Denied { kind: String, message: String },
}

impl CredentialOutcome {
    fn from_result(result: Result<Value, ConnectError>) -> Self {
        match result {
            Ok(payload) => CredentialOutcome::Granted(payload),
            Err(error) => CredentialOutcome::Denied {
                kind: error.kind().to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Produces the credentials report for one cycle.
///
/// `client_result` is the outcome of constructing the Connect client for
/// this cycle; a construction failure is reported with its full cause
/// chain and skips both exchanges.
pub async fn collect_credentials_report(
    headers: &HeaderMap,
    client_result: Result<Arc<dyn CredentialExchange>, ConnectError>,
) -> String {
    let session_token = extract_session_token(headers);
    let mut lines = vec![format!(
        "User session token present: {}",
        session_token.is_some()
    )];
    if let Some(token) = session_token.as_deref() {
        lines.push(format!(
            "User session token (first {SESSION_TOKEN_PREFIX_CHARS} chars): {}...",
            token
                .chars()
                .take(SESSION_TOKEN_PREFIX_CHARS)
                .collect::<String>()
        ));
    }

    lines.push(String::new());
    lines.push("Request headers:".to_string());
    for (name, value) in redacted_header_dump(headers) {
        lines.push(format!("  {name}: {value}"));
    }

    let client = match client_result {
        Ok(client) => client,
        Err(error) => {
            tracing::warn!(error = %error, "Connect client construction failed");
            lines.push(String::new());
            lines.push("Failed to initialize Connect client:".to_string());
            lines.push(format!("{}: {error}", error.kind()));
            for cause in error_chain_lines(&error).into_iter().skip(1) {
                lines.push(cause);
            }
            return lines.join("\n");
        }
    };

    let viewer = CredentialOutcome::from_result(
        client.viewer_credentials(session_token.as_deref()).await,
    );
    lines.extend(render_outcome("get_credentials()", &viewer));

    let content = CredentialOutcome::from_result(client.content_credentials().await);
    lines.extend(render_outcome("get_content_credentials()", &content));

    lines.join("\n")
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Dumps every inbound header with values redacted at the header
/// threshold, ordered by name.
fn redacted_header_dump(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut dump = BTreeMap::new();
    for name in headers.keys() {
        let value = headers
            .get_all(name)
            .iter()
            .map(|value| value.to_str().unwrap_or("<non-utf8 value>"))
            .collect::<Vec<_>>()
            .join(", ");
        dump.insert(
            name.as_str().to_string(),
            redact(&value, HEADER_VALUE_REDACT_CHARS),
        );
    }
    dump
}

fn render_outcome(label: &str, outcome: &CredentialOutcome) -> Vec<String> {
    match outcome {
        CredentialOutcome::Granted(payload) => {
            let rendered = serde_json::to_string_pretty(payload)
                .unwrap_or_else(|_| format!("{payload:?}"));
            vec![
                String::new(),
                format!("{label} response:"),
                rendered,
            ]
        }
        CredentialOutcome::Denied { kind, message } => {
            vec![String::new(), format!("{label} error: {kind}: {message}")]
        }
    }
}
