use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a redacted value is asked to leave the process in clear text.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
