use advisor_core::error::CoreError;

use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the command-line shell.
///
/// Completion failures are not here: they are expected outcomes and are
/// rendered as command output, not raised.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Error from this App
    #[error("Advisor Error: {message} {location}")]
    Advisor {
        message: String,
        location: ErrorLocation,
    },

    /// A user-supplied input file could not be read or parsed
    #[error("Input Error: {path}: {message} {location}")]
    Input {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },

    /// Error from advisor-core (config, credential, context)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AdvisorError {
    /// Text printed to stderr before a non-zero exit.
    ///
    /// Credential problems get their dedicated message; everything else is
    /// the full error, location included.
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::Core(CoreError::Credential(e)) => e.user_message(),
            other => other.to_string(),
        }
    }
}
