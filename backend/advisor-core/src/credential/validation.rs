//! Credential format validation.
//!
//! Catches obviously wrong values (template placeholders, stray quotes)
//! before they are sent as a bearer token.

use crate::error::{CredentialError, KeyValidationFailure};

use common::RedactedApiKey;

const MIN_KEY_LENGTH: usize = 10;

/// Validation result for a credential.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(KeyValidationFailure),
}

/// Validate a credential value.
pub fn validate_key(key: &str) -> ValidationResult {
    let trimmed = key.trim();

    if trimmed.is_empty() {
        return ValidationResult::Invalid(KeyValidationFailure::Empty);
    }

    if let Some(pattern) = detect_placeholder(trimmed) {
        return ValidationResult::Invalid(KeyValidationFailure::PlaceholderDetected { pattern });
    }

    if trimmed.len() < MIN_KEY_LENGTH {
        return ValidationResult::Invalid(KeyValidationFailure::TooShort {
            min: MIN_KEY_LENGTH,
            actual: trimmed.len(),
        });
    }

    if !is_valid_key_chars(trimmed) {
        return ValidationResult::Invalid(KeyValidationFailure::InvalidCharacters);
    }

    ValidationResult::Valid
}

/// Validate and wrap in RedactedApiKey if valid.
#[track_caller]
pub fn validate_and_wrap(env_var: &str, key: String) -> Result<RedactedApiKey, CredentialError> {
    match validate_key(&key) {
        ValidationResult::Valid => Ok(RedactedApiKey::new(key)),
        ValidationResult::Invalid(reason) => Err(CredentialError::invalid(env_var, reason)),
    }
}

/// Template prefixes from `.env.example`-style files. A key must start with
/// one of these to count as a placeholder; random key bodies never do.
static PLACEHOLDER_PREFIXES: &[(&str, &str)] = &[
    ("your-api-key", "your-api-key"),
    ("your_api_key", "your_api_key"),
    ("yourapikey", "yourapikey"),
    ("<your", "<your...>"),
    ("placeholder", "placeholder"),
    ("changeme", "changeme"),
    ("replace-me", "replace-me"),
    ("replace_me", "replace_me"),
    ("insert-your", "insert-your"),
    ("insert_your", "insert_your"),
];

/// Vendor prefix stripped before the masked-body check (`gsk_xxxx`).
const KEY_PREFIX: &str = "gsk_";

/// Detect whole-key placeholder values.
///
/// Only the key as a whole is judged: a template prefix, a truncated copy
/// ending in `...`, a body made only of `x`/`*`, or one repeated character.
/// Substrings inside an otherwise random key never match.
///
/// Returns the matched pattern name if detected.
fn detect_placeholder(key: &str) -> Option<&'static str> {
    let lower = key.to_lowercase();

    if let Some((_, name)) = PLACEHOLDER_PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
    {
        return Some(name);
    }

    if lower.ends_with("...") {
        return Some("ellipsis");
    }

    let body = lower.strip_prefix(KEY_PREFIX).unwrap_or(&lower);
    if !body.is_empty() && body.chars().all(|c| matches!(c, 'x' | '*')) {
        return Some("masked");
    }

    let mut chars = key.chars();
    if let Some(first_char) = chars.next() {
        if key.len() >= MIN_KEY_LENGTH && chars.all(|c| c == first_char) {
            return Some("repeated_char");
        }
    }

    None
}

/// Valid: alphanumeric, hyphen, underscore, period, colon
fn is_valid_key_chars(key: &str) -> bool {
    key.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
