//! Error taxonomy and the credential-exchange trait seam.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates supported `ConnectError` values.
pub enum ConnectError {
    #[error("CONNECT_SERVER is not configured")]
    MissingServerUrl,
    #[error("no content session token is available for the service exchange")]
    MissingContentSessionToken,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("credential endpoint returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ConnectError {
    /// Stable kind name surfaced in diagnostic reports, standing in for
    /// the vendor error's type name.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectError::MissingServerUrl => "MissingServerUrl",
            ConnectError::MissingContentSessionToken => "MissingContentSessionToken",
            ConnectError::Http(_) => "Http",
            ConnectError::HttpStatus { .. } => "HttpStatus",
            ConnectError::Serde(_) => "Serde",
            ConnectError::InvalidResponse(_) => "InvalidResponse",
        }
    }
}

/// Renders an error and its full source chain, one line per cause.
///
/// Used where the diagnostic report needs the complete failure context
/// rather than just the top-level message.
pub fn error_chain_lines(error: &dyn std::error::Error) -> Vec<String> {
    let mut lines = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    lines
}

#[async_trait]
/// Trait contract for `CredentialExchange` behavior.
///
/// Two independent exchanges exist: the viewer exchange keyed by the
/// end-user session token, and the content exchange keyed by the
/// deployed application's own ambient identity.
pub trait CredentialExchange: Send + Sync {
    async fn viewer_credentials(&self, session_token: Option<&str>)
        -> Result<Value, ConnectError>;

    async fn content_credentials(&self) -> Result<Value, ConnectError>;
}
