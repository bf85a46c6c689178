//! Command handlers. Each returns the text to print and whether the command
//! succeeded; only local problems (unreadable input files) are errors.

pub mod ask;
pub mod models;
pub mod self_test;

use crate::cli::Command;
use crate::error::AdvisorError;

use advisor_core::{AdvisorConfig, CompletionClient};

/// Rendered result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}

pub async fn dispatch(
    command: &Command,
    client: &CompletionClient,
    config: &AdvisorConfig,
) -> Result<CommandOutput, AdvisorError> {
    match command {
        Command::Ask(args) => ask::run(client, args, &config.retry.to_policy()).await,
        Command::Models => Ok(models::run(client).await),
        Command::SelfTest => Ok(self_test::run(client).await),
    }
}
