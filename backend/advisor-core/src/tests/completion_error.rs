// Unit tests for the completion failure taxonomy
// HTTP-level behaviour against a mock server lives in integration_tests/

use crate::error::{CompletionError, FailureKind};

use std::collections::HashSet;

/// **VALUE**: Verifies the status-code → failure-kind table.
///
/// **WHY THIS MATTERS**: This mapping is the whole contract between the client
/// and its callers. A caller that shows "check your key" for a 429 sends the
/// user chasing the wrong problem.
///
/// **BUG THIS CATCHES**: Would catch a reordered or collapsed match arm
/// (e.g. 401 falling through to the generic API error).
#[test]
fn given_status_codes_when_from_status_then_maps_to_expected_kind() {
    let cases = [
        (400, FailureKind::BadRequest),
        (401, FailureKind::Unauthorized),
        (429, FailureKind::RateLimited),
        (403, FailureKind::ApiError),
        (404, FailureKind::ApiError),
        (500, FailureKind::ApiError),
        (503, FailureKind::ApiError),
    ];

    for (status, expected) in cases {
        let err = CompletionError::from_status(status, "body");
        assert_eq!(err.kind(), expected, "HTTP {status}");
        assert_eq!(err.status_code(), Some(status));
    }
}

/// **VALUE**: Verifies JSON error bodies are pretty-printed for display.
///
/// **BUG THIS CATCHES**: Would catch the parse branch being skipped, which
/// leaves users staring at a single-line JSON blob.
#[test]
fn given_json_error_body_when_other_status_then_detail_is_pretty_json() {
    let body = r#"{"error":{"message":"model not found","type":"invalid_request_error"}}"#;

    let err = CompletionError::from_status(404, body);

    assert_eq!(err.kind(), FailureKind::ApiError);
    assert!(err.detail().contains('\n'), "Pretty JSON spans lines");
    assert!(err.detail().contains("\"message\": \"model not found\""));
}

#[test]
fn given_plain_text_body_when_other_status_then_detail_is_raw_text() {
    let err = CompletionError::from_status(502, "Bad Gateway");

    assert_eq!(err.kind(), FailureKind::ApiError);
    assert_eq!(err.detail(), "Bad Gateway");
}

#[test]
fn given_unauthorized_when_body_is_json_then_detail_is_kept_raw() {
    let body = r#"{"error":"invalid key"}"#;

    let err = CompletionError::from_status(401, body);

    assert_eq!(err.detail(), body);
}

/// **VALUE**: Verifies only transient failures are retryable.
///
/// **WHY THIS MATTERS**: The retry layer trusts this flag blindly. Retrying a
/// missing key or an empty prompt just repeats the same failure.
#[test]
fn given_each_kind_when_is_retryable_then_only_transient_failures_retry() {
    assert!(CompletionError::from_status(429, "").is_retryable());
    assert!(CompletionError::from_status(503, "").is_retryable());
    assert!(!CompletionError::from_status(500, "").is_retryable());
    assert!(!CompletionError::from_status(400, "").is_retryable());
    assert!(!CompletionError::from_status(401, "").is_retryable());
    assert!(!CompletionError::missing_credential("GROQ_API_KEY").is_retryable());
    assert!(!CompletionError::empty_prompt().is_retryable());
    assert!(!CompletionError::malformed_response("no choices", "{}").is_retryable());
}

/// **VALUE**: Verifies every kind renders a different user-facing message.
///
/// **WHY THIS MATTERS**: Users must be able to tell "you have no key" from
/// "you are rate-limited" from "the service is unreachable".
#[test]
fn given_all_kinds_when_user_message_then_messages_are_distinct() {
    let errors = [
        CompletionError::missing_credential("GROQ_API_KEY"),
        CompletionError::empty_prompt(),
        CompletionError::from_status(400, "x"),
        CompletionError::from_status(401, "x"),
        CompletionError::from_status(429, "x"),
        CompletionError::from_status(500, "x"),
        CompletionError::malformed_response("no choices", "x"),
        CompletionError::Transport {
            message: "x".to_string(),
            is_timeout: false,
            is_connection: true,
            location: common::ErrorLocation::from(std::panic::Location::caller()),
        },
    ];

    let kinds: HashSet<FailureKind> = errors.iter().map(|e| e.kind()).collect();
    let messages: HashSet<String> = errors.iter().map(|e| e.user_message()).collect();

    assert_eq!(kinds.len(), errors.len(), "Each error has its own kind");
    assert_eq!(messages.len(), errors.len(), "Each kind has its own message");
}

#[test]
fn given_missing_credential_when_user_message_then_names_env_var() {
    let err = CompletionError::missing_credential("GROQ_API_KEY");

    assert!(err.user_message().contains("GROQ_API_KEY"));
    assert_eq!(err.detail(), "GROQ_API_KEY");
}

/// **VALUE**: Verifies Display carries the construction site.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from a
/// constructor, which makes every error point into completion.rs.
#[test]
fn given_error_constructed_here_when_formatted_then_location_points_here() {
    let err = CompletionError::from_status(429, "slow down");

    let formatted = err.to_string();

    assert!(formatted.contains("Rate Limited Error"));
    assert!(formatted.contains("slow down"));
    assert!(formatted.contains("completion_error.rs"), "{formatted}");
}

#[test]
fn given_transport_errors_when_error_category_then_distinguishes_cause() {
    let location = common::ErrorLocation::from(std::panic::Location::caller());
    let timeout = CompletionError::Transport {
        message: "timed out".to_string(),
        is_timeout: true,
        is_connection: false,
        location,
    };
    let other = CompletionError::Transport {
        message: "decode".to_string(),
        is_timeout: false,
        is_connection: false,
        location,
    };

    assert_eq!(timeout.error_category(), "timeout");
    assert!(timeout.is_retryable());
    assert_eq!(other.error_category(), "transport");
    assert!(!other.is_retryable());
}
