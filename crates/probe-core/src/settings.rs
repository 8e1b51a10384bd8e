//! Connection settings snapshot sourced from the process environment.
//!
//! Captures the platform-injected variables relevant to the Connect
//! credential endpoint. A fresh snapshot is taken on every diagnostic
//! cycle so reports always reflect the current environment.

use std::collections::BTreeMap;

pub const CONNECT_SERVER_ENV: &str = "CONNECT_SERVER";
pub const POSIT_PRODUCT_ENV: &str = "POSIT_PRODUCT";
pub const CONNECT_API_KEY_ENV: &str = "CONNECT_API_KEY";
pub const CONNECT_CONTENT_SESSION_TOKEN_ENV: &str = "CONNECT_CONTENT_SESSION_TOKEN";

const PLATFORM_VAR_PREFIXES: [&str; 2] = ["CONNECT_", "POSIT_"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Snapshot of the platform connection variables for one diagnostic cycle.
pub struct ConnectionSettings {
    pub server_url: Option<String>,
    pub product: Option<String>,
    /// Every variable under a recognized platform prefix, ordered by name.
    pub platform_vars: BTreeMap<String, String>,
}

impl ConnectionSettings {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Builds a snapshot from an explicit variable set. Test seam; also
    /// keeps the collection rules pure and independently checkable.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut settings = ConnectionSettings::default();
        for (name, value) in vars {
            if PLATFORM_VAR_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix))
            {
                settings.platform_vars.insert(name.clone(), value.clone());
            }
            match name.as_str() {
                CONNECT_SERVER_ENV => settings.server_url = Some(value),
                POSIT_PRODUCT_ENV => settings.product = Some(value),
                _ => {}
            }
        }
        settings
    }

    pub fn api_key(&self) -> Option<&str> {
        self.platform_var(CONNECT_API_KEY_ENV)
    }

    pub fn content_session_token(&self) -> Option<&str> {
        self.platform_var(CONNECT_CONTENT_SESSION_TOKEN_ENV)
    }

    fn platform_var(&self, name: &str) -> Option<&str> {
        self.platform_vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}
