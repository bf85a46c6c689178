use crate::commands::CommandOutput;

use advisor_core::CompletionClient;

/// Print one model id per line.
pub async fn run(client: &CompletionClient) -> CommandOutput {
    match client.list_available_models().await {
        Ok(ids) if ids.is_empty() => CommandOutput::success("(no models listed)"),
        Ok(ids) => CommandOutput::success(ids.join("\n")),
        Err(error) => CommandOutput::failure(error.user_message()),
    }
}
