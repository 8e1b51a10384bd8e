//! reqwest-backed client for the Connect OAuth integrations endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use probe_core::ConnectionSettings;

use crate::{
    ConnectError, CredentialExchange, CONTENT_SESSION_TOKEN_TYPE, OAUTH_CREDENTIALS_PATH,
    TOKEN_EXCHANGE_GRANT_TYPE, USER_SESSION_TOKEN_TYPE,
};

#[derive(Debug, Clone)]
/// Connection material for one `ConnectClient`.
pub struct ConnectClientConfig {
    pub server_url: String,
    pub api_key: Option<String>,
    pub content_session_token: Option<String>,
    /// Zero means no client-side timeout. The raw transport probe carries
    /// its own fixed timeout; the exchange calls deliberately do not.
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// Credential-exchange client constructed from ambient platform settings.
pub struct ConnectClient {
    client: reqwest::Client,
    config: ConnectClientConfig,
}

impl ConnectClient {
    pub fn new(config: ConnectClientConfig) -> Result<Self, ConnectError> {
        if config.server_url.trim().is_empty() {
            return Err(ConnectError::MissingServerUrl);
        }

        let mut headers = HeaderMap::new();
        if let Some(api_key) = config.api_key.as_deref() {
            let value = format!("Key {}", api_key.trim());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|e| {
                    ConnectError::InvalidResponse(format!("invalid API key header: {e}"))
                })?,
            );
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(std::time::Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Builds a client from a settings snapshot, the ambient-construction
    /// path used by each diagnostic cycle.
    pub fn from_settings(
        settings: &ConnectionSettings,
        request_timeout_ms: u64,
    ) -> Result<Self, ConnectError> {
        let server_url = settings
            .server_url
            .clone()
            .ok_or(ConnectError::MissingServerUrl)?;
        Self::new(ConnectClientConfig {
            server_url,
            api_key: settings.api_key().map(str::to_string),
            content_session_token: settings.content_session_token().map(str::to_string),
            request_timeout_ms,
        })
    }

    pub fn credentials_url(&self) -> String {
        format!("{}{}", self.config.server_url, OAUTH_CREDENTIALS_PATH)
    }

    async fn exchange(
        &self,
        subject_token_type: &str,
        subject_token: &str,
    ) -> Result<Value, ConnectError> {
        let response = self
            .client
            .post(self.credentials_url())
            .form(&[
                ("grant_type", TOKEN_EXCHANGE_GRANT_TYPE),
                ("subject_token_type", subject_token_type),
                ("subject_token", subject_token),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CredentialExchange for ConnectClient {
    async fn viewer_credentials(
        &self,
        session_token: Option<&str>,
    ) -> Result<Value, ConnectError> {
        // An absent token is still exchanged (as empty) so the server's
        // rejection is observable rather than masked by a local skip.
        self.exchange(USER_SESSION_TOKEN_TYPE, session_token.unwrap_or_default())
            .await
    }

    async fn content_credentials(&self) -> Result<Value, ConnectError> {
        let token = self
            .config
            .content_session_token
            .clone()
            .ok_or(ConnectError::MissingContentSessionToken)?;
        self.exchange(CONTENT_SESSION_TOKEN_TYPE, &token).await
    }
}
