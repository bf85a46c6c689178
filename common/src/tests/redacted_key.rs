// Unit tests for RedactedApiKey

use crate::RedactedApiKey;

/// **VALUE**: Verifies the credential never shows up in Debug or Display output.
///
/// **WHY THIS MATTERS**: Config and client structs derive Debug and end up in
/// log lines. A leaked bearer token in a log file is a credential compromise.
///
/// **BUG THIS CATCHES**: Would catch someone replacing the manual Debug impl
/// with `#[derive(Debug)]`.
#[test]
fn given_key_when_formatted_then_value_is_hidden() {
    let key = RedactedApiKey::new("gsk_live_secret_value_123".to_string());

    let debug = format!("{:?}", key);
    let display = format!("{}", key);

    assert!(!debug.contains("secret"), "Debug leaked the key: {debug}");
    assert!(!display.contains("secret"), "Display leaked the key: {display}");
    assert_eq!(key.as_str(), "gsk_live_secret_value_123");
}

/// **VALUE**: Verifies serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a derived Serialize sneaking the key into
/// a saved config file.
#[test]
fn given_key_when_serialized_then_returns_error() {
    let key = RedactedApiKey::new("gsk_live_secret_value_123".to_string());

    let result = serde_json::to_string(&key);

    assert!(result.is_err(), "Serialization must fail");
}

/// **VALUE**: Verifies the masked preview shows only a prefix.
///
/// **WHY THIS MATTERS**: The self-test prints this preview so users can tell
/// which key is loaded. It must never print the whole key.
#[test]
fn given_key_when_masked_preview_then_shows_prefix_only() {
    let key = RedactedApiKey::new("gsk_abcdefghijklmnop".to_string());

    assert_eq!(key.masked_preview(4), "gsk_****");
}

#[test]
fn given_short_key_when_masked_preview_then_fully_masked() {
    let key = RedactedApiKey::new("abc".to_string());

    assert_eq!(key.masked_preview(4), "****");
}

#[test]
fn given_key_with_whitespace_when_created_then_trimmed() {
    let key = RedactedApiKey::new("  gsk_abcdefghijkl \n".to_string());

    assert_eq!(key.as_str(), "gsk_abcdefghijkl");
    assert_eq!(key.len(), 16);
    assert!(!key.is_empty());
}
