pub mod completion;
pub mod config;
pub mod context;
pub mod credential;

pub use completion::{CompletionError, CompletionResult, FailureKind};
pub use config::ConfigError;
pub use context::ContextError;
pub use credential::{CredentialError, KeyValidationFailure};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}
