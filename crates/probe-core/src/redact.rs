//! Truncation-based redaction for surfaced configuration and header values.

const ELLIPSIS: &str = "...";

/// Truncates `value` to at most `max_len` characters followed by `...`.
///
/// Values at or under the threshold pass through unchanged. Truncation
/// counts characters, not bytes, so multi-byte values never split mid
/// code point. Call sites own their thresholds (20 for configuration
/// values, 30 for request header values); the thresholds are independent
/// contracts and must not be unified.
pub fn redact(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_len).collect::<String>();
    truncated.push_str(ELLIPSIS);
    truncated
}
