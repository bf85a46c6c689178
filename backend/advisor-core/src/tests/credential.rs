// Unit tests for credential validation and environment loading
// Env-var tests are serialized: the process environment is global.

use crate::credential::read_credential;
use crate::credential::validation::{ValidationResult, validate_key};
use crate::error::{CredentialError, KeyValidationFailure};

use serial_test::serial;

const TEST_ENV_VAR: &str = "ADVISOR_CORE_TEST_CREDENTIAL";

fn set_test_env(value: &str) {
    // SAFETY: env-mutating tests run under #[serial].
    unsafe { std::env::set_var(TEST_ENV_VAR, value) };
}

fn clear_test_env() {
    // SAFETY: env-mutating tests run under #[serial].
    unsafe { std::env::remove_var(TEST_ENV_VAR) };
}

#[test]
fn given_realistic_key_when_validated_then_valid() {
    assert_eq!(
        validate_key("gsk_4fQ9mZ2pLx7Rt1VbN8cK3sWy"),
        ValidationResult::Valid
    );
}

/// **VALUE**: Verifies template values from `.env.example` are caught.
///
/// **WHY THIS MATTERS**: A copied example file sends `your-api-key-here` as a
/// bearer token, and the user gets a 401 with no hint that the key is fake.
#[test]
fn given_placeholder_keys_when_validated_then_rejected_with_pattern() {
    let placeholders = [
        "your-api-key-here",
        "<your groq key>",
        "gsk_xxxxxxxxxxxxxxxx",
        "changeme12345",
        "aaaaaaaaaaaaaaaa",
        "gsk_4fQ9mZ2p...",
        "replace_me_with_groq_key",
    ];

    for key in placeholders {
        assert!(
            matches!(
                validate_key(key),
                ValidationResult::Invalid(KeyValidationFailure::PlaceholderDetected { .. })
            ),
            "Expected placeholder for {key:?}"
        );
    }
}

/// **VALUE**: Verifies real keys that happen to contain template words are accepted.
///
/// **WHY THIS MATTERS**: Random base62 keys contain `xxx` (any case) often
/// enough that a substring match rejects real users, who are then told no
/// key is configured while one is set.
///
/// **BUG THIS CATCHES**: Would catch placeholder detection going back to
/// `contains()` instead of judging the key as a whole.
#[test]
fn given_real_keys_containing_template_words_when_validated_then_valid() {
    let real_keys = [
        "gsk_8KqXxX2mPz7Lw4RtVb9Nc3Jd5Hf6Gy1Ae0Ts",
        "gsk_Ab3ReplacEq9Lm2Zt7Wx4Vy8Nc1Pd6Fh5Gj0K",
        "gsk_Q7insertK2mPz7Lw4RtVb9Nc3Jd5Hf6Gy1Ae",
        "gsk_Zt7Wx4Vy8Nc1Pd6Fh5Gj0K..Q7mPz7Lw4Rt",
        "gsk_placeHolder9Lm2Zt7Wx4Vy8Nc1Pd6Fh5Gj",
    ];

    for key in real_keys {
        assert_eq!(validate_key(key), ValidationResult::Valid, "{key:?} is a real key");
    }
}

#[test]
fn given_short_or_malformed_keys_when_validated_then_rejected() {
    assert_eq!(
        validate_key("gsk_12"),
        ValidationResult::Invalid(KeyValidationFailure::TooShort { min: 10, actual: 6 })
    );
    assert_eq!(
        validate_key("\"gsk_4fQ9mZ2pLx7Rt1\""),
        ValidationResult::Invalid(KeyValidationFailure::InvalidCharacters)
    );
    assert_eq!(
        validate_key("   "),
        ValidationResult::Invalid(KeyValidationFailure::Empty)
    );
}

#[test]
#[serial]
fn given_unset_env_var_when_read_credential_then_none() {
    clear_test_env();

    let result = read_credential(TEST_ENV_VAR).unwrap();

    assert!(result.is_none());
}

/// **VALUE**: Verifies a blank variable counts as unset, not invalid.
///
/// **WHY THIS MATTERS**: `GROQ_API_KEY=` in a .env file is common. It should
/// surface as "no key configured", the clearest message for the user.
#[test]
#[serial]
fn given_blank_env_var_when_read_credential_then_none() {
    set_test_env("   ");

    let result = read_credential(TEST_ENV_VAR).unwrap();

    assert!(result.is_none());
    clear_test_env();
}

#[test]
#[serial]
fn given_valid_env_var_when_read_credential_then_wrapped_key() {
    set_test_env(" gsk_4fQ9mZ2pLx7Rt1VbN8cK3sWy ");

    let key = read_credential(TEST_ENV_VAR).unwrap().unwrap();

    assert_eq!(key.as_str(), "gsk_4fQ9mZ2pLx7Rt1VbN8cK3sWy");
    clear_test_env();
}

#[test]
#[serial]
fn given_placeholder_env_var_when_read_credential_then_invalid_error() {
    set_test_env("your-api-key-here");

    let result = read_credential(TEST_ENV_VAR);

    match result {
        Err(CredentialError::Invalid { env_var, reason, .. }) => {
            assert_eq!(env_var, TEST_ENV_VAR);
            assert!(matches!(reason, KeyValidationFailure::PlaceholderDetected { .. }));
        }
        other => panic!("Expected Invalid error, got {other:?}"),
    }
    clear_test_env();
}
