use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors raised while turning dataset or forecast input into prompt context.
#[derive(Debug, ThisError)]
pub enum ContextError {
    #[error("Context Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Context Shape Error: row '{period}' has {actual} values, expected {expected} {location}")]
    RowWidth {
        period: String,
        expected: usize,
        actual: usize,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for ContextError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ContextError::Parse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
