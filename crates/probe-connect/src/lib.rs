//! Connect credential-exchange client.
//!
//! Talks to the platform's OAuth integrations endpoint and trades a
//! session token for OAuth credentials. The `CredentialExchange` trait is
//! the seam the diagnostic probes consume so failures can be injected in
//! tests without a live server.

mod client;
mod types;

pub use client::{ConnectClient, ConnectClientConfig};
pub use types::{error_chain_lines, ConnectError, CredentialExchange};

/// Fixed path of the credential endpoint, appended verbatim to the
/// configured server URL with no trailing-slash normalization.
pub const OAUTH_CREDENTIALS_PATH: &str = "/__api__/v1/oauth/integrations/credentials";

pub const TOKEN_EXCHANGE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
pub const USER_SESSION_TOKEN_TYPE: &str = "urn:posit:connect:user-session-token";
pub const CONTENT_SESSION_TOKEN_TYPE: &str = "urn:posit:connect:content-session-token";
