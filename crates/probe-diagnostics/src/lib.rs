//! Diagnostic report producers for the Connect credential probe.
//!
//! Three independent producers share one refresh signal: the environment
//! snapshot, the credential-exchange probe, and the raw HTTP probe. Each
//! produces a verbatim multi-line report and converts every internal
//! failure to report text; nothing propagates past a producer boundary.

pub mod credentials;
pub mod environment;
pub mod raw_http;
pub mod refresh;

pub use credentials::{
    collect_credentials_report, CredentialOutcome, SESSION_TOKEN_HEADER,
    SESSION_TOKEN_PREFIX_CHARS,
};
pub use environment::collect_environment_report;
pub use raw_http::{
    collect_raw_http_report, render_raw_probe_report, run_raw_http_probe, RawProbeOutcome,
    RAW_PROBE_SKIP_MESSAGE, RAW_PROBE_TIMEOUT_MS,
};
pub use refresh::RefreshSignal;

/// Redaction threshold for bulk-collected configuration values.
pub const CONFIG_VALUE_REDACT_CHARS: usize = 20;
/// Redaction threshold for inbound request header values. Independent of
/// the configuration threshold; the two are separate contracts.
pub const HEADER_VALUE_REDACT_CHARS: usize = 30;
