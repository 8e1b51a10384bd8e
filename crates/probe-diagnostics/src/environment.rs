//! Environment snapshot report.

use std::collections::BTreeMap;

use probe_core::{redact, ConnectionSettings};

use crate::CONFIG_VALUE_REDACT_CHARS;

const NOT_SET_PLACEHOLDER: &str = "<not set>";

/// Renders the environment report for one settings snapshot.
///
/// The two named keys are shown in full; every bulk-collected value is
/// redacted at the configuration threshold. Absent configuration degrades
/// to a placeholder, never an error.
pub fn collect_environment_report(settings: &ConnectionSettings) -> String {
    let server_url = settings.server_url.as_deref().unwrap_or(NOT_SET_PLACEHOLDER);
    let product = settings.product.as_deref().unwrap_or(NOT_SET_PLACEHOLDER);

    let redacted_vars = settings
        .platform_vars
        .iter()
        .map(|(name, value)| (name.clone(), redact(value, CONFIG_VALUE_REDACT_CHARS)))
        .collect::<BTreeMap<_, _>>();
    let vars_json = serde_json::to_string_pretty(&redacted_vars)
        .unwrap_or_else(|_| format!("{redacted_vars:?}"));

    let lines = vec![
        format!("CONNECT_SERVER = {server_url}"),
        format!("POSIT_PRODUCT  = {product}"),
        String::new(),
        "All CONNECT_*/POSIT_* env vars:".to_string(),
        vars_json,
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(entries: &[(&str, &str)]) -> ConnectionSettings {
        ConnectionSettings::from_vars(
            entries
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        )
    }

    #[test]
    fn absent_keys_render_placeholders() {
        let report = collect_environment_report(&settings(&[]));
        assert!(report.contains("CONNECT_SERVER = <not set>"));
        assert!(report.contains("POSIT_PRODUCT  = <not set>"));
        assert!(report.contains("All CONNECT_*/POSIT_* env vars:"));
    }

    #[test]
    fn named_keys_are_shown_in_full() {
        let long_url = format!("https://{}.example.com", "a".repeat(40));
        let report = collect_environment_report(&settings(&[("CONNECT_SERVER", &long_url)]));
        // The named key line carries the full value even past the
        // redaction threshold.
        assert!(report.contains(&format!("CONNECT_SERVER = {long_url}")));
    }

    #[test]
    fn bulk_values_are_redacted_at_twenty() {
        let secret = "s".repeat(48);
        let report = collect_environment_report(&settings(&[("CONNECT_API_KEY", &secret)]));
        let expected = format!("{}...", "s".repeat(20));
        assert!(report.contains(&expected));
        assert!(!report.contains(&secret));
    }

    #[test]
    fn bulk_map_keys_are_sorted() {
        let report = collect_environment_report(&settings(&[
            ("POSIT_PRODUCT", "CONNECT_CLOUD"),
            ("CONNECT_SERVER", "https://c.example.com"),
            ("CONNECT_API_KEY", "k"),
        ]));
        let api_key_at = report.find("CONNECT_API_KEY").expect("api key");
        let server_at = report.rfind("CONNECT_SERVER").expect("server");
        let product_at = report.rfind("POSIT_PRODUCT").expect("product");
        assert!(api_key_at < server_at);
        assert!(server_at < product_at);
    }
}
