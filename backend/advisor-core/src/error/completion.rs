//! Error types for completion endpoint calls.
//!
//! Key design decisions:
//! - Every expected failure is a value, never a panic
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses status codes and transport flags, not message content
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::fmt;
use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

/// Flat classification of a [`CompletionError`], for callers that only need
/// to branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MissingCredential,
    EmptyPrompt,
    BadRequest,
    Unauthorized,
    RateLimited,
    ApiError,
    MalformedResponse,
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingCredential => "MissingCredential",
            Self::EmptyPrompt => "EmptyPrompt",
            Self::BadRequest => "BadRequest",
            Self::Unauthorized => "Unauthorized",
            Self::RateLimited => "RateLimited",
            Self::ApiError => "ApiError",
            Self::MalformedResponse => "MalformedResponse",
            Self::Transport => "Transport",
        };
        write!(f, "{name}")
    }
}

/// Failure outcome of a completion or model-listing call.
#[derive(Debug, ThisError)]
pub enum CompletionError {
    #[error("Missing Credential Error: {env_var} is not set {location}")]
    MissingCredential {
        env_var: String,
        location: ErrorLocation,
    },

    #[error("Empty Prompt Error: prompt is blank after trimming {location}")]
    EmptyPrompt { location: ErrorLocation },

    #[error("Bad Request Error: HTTP {status_code} - {detail} {location}")]
    BadRequest {
        status_code: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized Error: HTTP {status_code} - {detail} {location}")]
    Unauthorized {
        status_code: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Rate Limited Error: HTTP {status_code} - {detail} {location}")]
    RateLimited {
        status_code: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("API Error: HTTP {status_code} - {detail} {location}")]
    Api {
        status_code: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Malformed Response Error: {reason} - {body} {location}")]
    MalformedResponse {
        reason: String,
        body: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },
}

/// Result of a completion call: the reply text or a classified failure.
pub type CompletionResult = Result<String, CompletionError>;

impl CompletionError {
    #[track_caller]
    pub fn missing_credential(env_var: impl Into<String>) -> Self {
        CompletionError::MissingCredential {
            env_var: env_var.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn empty_prompt() -> Self {
        CompletionError::EmptyPrompt {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_response(reason: impl Into<String>, body: impl Into<String>) -> Self {
        CompletionError::MalformedResponse {
            reason: reason.into(),
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Map a non-200 HTTP response to its failure kind.
    ///
    /// 400, 401 and 429 keep the raw body as detail. Any other status is an
    /// API error whose detail is the pretty-printed JSON body when it parses,
    /// or the raw text otherwise.
    #[track_caller]
    pub fn from_status(status_code: u16, body: impl Into<String>) -> Self {
        let status_code = HttpStatusCode::from(status_code);
        let detail = body.into();
        let location = ErrorLocation::from(Location::caller());

        match status_code {
            HttpStatusCode::BAD_REQUEST => CompletionError::BadRequest {
                status_code,
                detail,
                location,
            },
            HttpStatusCode::UNAUTHORIZED => CompletionError::Unauthorized {
                status_code,
                detail,
                location,
            },
            HttpStatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited {
                status_code,
                detail,
                location,
            },
            _ => CompletionError::Api {
                status_code,
                detail: render_error_body(detail),
                location,
            },
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        CompletionError::Transport {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            CompletionError::MissingCredential { .. } => FailureKind::MissingCredential,
            CompletionError::EmptyPrompt { .. } => FailureKind::EmptyPrompt,
            CompletionError::BadRequest { .. } => FailureKind::BadRequest,
            CompletionError::Unauthorized { .. } => FailureKind::Unauthorized,
            CompletionError::RateLimited { .. } => FailureKind::RateLimited,
            CompletionError::Api { .. } => FailureKind::ApiError,
            CompletionError::MalformedResponse { .. } => FailureKind::MalformedResponse,
            CompletionError::Transport { .. } => FailureKind::Transport,
        }
    }

    /// The failure detail: response body, transport message, or the name of
    /// the missing credential variable.
    pub fn detail(&self) -> &str {
        match self {
            CompletionError::MissingCredential { env_var, .. } => env_var,
            CompletionError::EmptyPrompt { .. } => "",
            CompletionError::BadRequest { detail, .. }
            | CompletionError::Unauthorized { detail, .. }
            | CompletionError::RateLimited { detail, .. }
            | CompletionError::Api { detail, .. } => detail,
            CompletionError::MalformedResponse { body, .. } => body,
            CompletionError::Transport { message, .. } => message,
        }
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CompletionError::BadRequest { status_code, .. }
            | CompletionError::Unauthorized { status_code, .. }
            | CompletionError::RateLimited { status_code, .. }
            | CompletionError::Api { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Check if this error is retryable based on error category, NOT string content.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Transport {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,

            CompletionError::RateLimited { .. } => true,

            CompletionError::Api { status_code, .. } => status_code.is_retryable(),

            CompletionError::MissingCredential { .. } => false,
            CompletionError::EmptyPrompt { .. } => false,
            CompletionError::BadRequest { .. } => false,
            CompletionError::Unauthorized { .. } => false,
            CompletionError::MalformedResponse { .. } => false,
        }
    }

    /// Get error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            CompletionError::MissingCredential { .. } => "missing_credential",
            CompletionError::EmptyPrompt { .. } => "empty_prompt",
            CompletionError::BadRequest { .. } => "bad_request",
            CompletionError::Unauthorized { .. } => "unauthorized",
            CompletionError::RateLimited { .. } => "rate_limited",
            CompletionError::Api { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            CompletionError::Api { .. } => "api_error",
            CompletionError::MalformedResponse { .. } => "malformed_response",
            CompletionError::Transport {
                is_timeout: true, ..
            } => "timeout",
            CompletionError::Transport {
                is_connection: true,
                ..
            } => "connection",
            CompletionError::Transport { .. } => "transport",
        }
    }

    /// Message shown to the person who asked the question.
    ///
    /// Every kind renders differently so "no key", "rate limited" and
    /// "unreachable" can be told apart without reading logs.
    pub fn user_message(&self) -> String {
        match self {
            CompletionError::MissingCredential { env_var, .. } => {
                format!("❌ No API key configured. Set the {env_var} environment variable.")
            }
            CompletionError::EmptyPrompt { .. } => {
                "⚠️ Please enter a valid question.".to_string()
            }
            CompletionError::BadRequest { detail, .. } => {
                format!("⚠️ The completion service rejected the request (HTTP 400):\n{detail}")
            }
            CompletionError::Unauthorized { .. } => {
                "❌ The API key was rejected (HTTP 401). Check that it is valid and active."
                    .to_string()
            }
            CompletionError::RateLimited { .. } => {
                "⏳ Rate limit reached (HTTP 429). Wait a moment and try again.".to_string()
            }
            CompletionError::Api {
                status_code,
                detail,
                ..
            } => format!("⚠️ API Error (HTTP {status_code}):\n{detail}"),
            CompletionError::MalformedResponse { body, .. } => {
                format!("⚠️ The completion service returned an unexpected response:\n{body}")
            }
            CompletionError::Transport { message, .. } => {
                format!("❌ The completion service is unreachable: {message}")
            }
        }
    }
}

/// Pretty-print a JSON error body, or return it unchanged when it isn't JSON.
fn render_error_body(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or(body),
        Err(_) => body,
    }
}
