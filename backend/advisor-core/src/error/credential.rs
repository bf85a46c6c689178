//! Error types for credential loading.

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors that can occur while reading the bearer credential.
///
/// A variable that is simply absent is not an error; it surfaces later as
/// a missing-credential completion failure.
#[derive(Debug, ThisError)]
pub enum CredentialError {
    #[error("Credential Encoding Error: {env_var} contains invalid unicode {location}")]
    NotUnicode {
        env_var: String,
        location: ErrorLocation,
    },

    #[error("Credential Validation Error: {env_var}: {reason} {location}")]
    Invalid {
        env_var: String,
        reason: KeyValidationFailure,
        location: ErrorLocation,
    },
}

/// Specific reasons for key validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationFailure {
    Empty,
    TooShort { min: usize, actual: usize },
    PlaceholderDetected { pattern: &'static str },
    InvalidCharacters,
}

impl std::fmt::Display for KeyValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "key is empty"),
            Self::TooShort { min, actual } => {
                write!(f, "key too short ({} chars, minimum {})", actual, min)
            }
            Self::PlaceholderDetected { pattern } => {
                write!(f, "detected placeholder pattern '{}'", pattern)
            }
            Self::InvalidCharacters => write!(f, "contains invalid characters"),
        }
    }
}

impl CredentialError {
    #[track_caller]
    pub fn not_unicode(env_var: impl Into<String>) -> Self {
        CredentialError::NotUnicode {
            env_var: env_var.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid(env_var: impl Into<String>, reason: KeyValidationFailure) -> Self {
        CredentialError::Invalid {
            env_var: env_var.into(),
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message shown to the person running the command. Names the variable
    /// and the reason so a set-but-unusable key is not mistaken for an
    /// unset one.
    pub fn user_message(&self) -> String {
        match self {
            CredentialError::NotUnicode { env_var, .. } => {
                format!("❌ {env_var} contains invalid unicode. Re-enter the API key.")
            }
            CredentialError::Invalid {
                env_var, reason, ..
            } => format!("❌ The API key in {env_var} is unusable ({reason}). Set it to a real key."),
        }
    }
}
