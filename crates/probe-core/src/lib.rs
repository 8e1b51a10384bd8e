//! Foundational utilities shared across probe crates.
//!
//! Provides the redaction helper applied to every surfaced secret-shaped
//! value and the connection settings snapshot read from the process
//! environment.

pub mod redact;
pub mod settings;

pub use redact::redact;
pub use settings::{
    ConnectionSettings, CONNECT_API_KEY_ENV, CONNECT_CONTENT_SESSION_TOKEN_ENV,
    CONNECT_SERVER_ENV, POSIT_PRODUCT_ENV,
};
