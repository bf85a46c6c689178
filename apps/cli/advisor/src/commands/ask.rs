use crate::cli::AskArgs;
use crate::commands::CommandOutput;
use crate::error::AdvisorError;

use advisor_core::context::{SalesTable, parse_forecast_json};
use advisor_core::error::{ContextError, CoreError};
use advisor_core::{CompletionClient, PromptContext, RetryPolicy, complete_with_retry};

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{debug, info, warn};

/// Ask the question in `args`, with whatever context files were given.
///
/// # Returns
///
/// * `Ok(CommandOutput)` - The reply, or the failure's user-facing message
/// * `Err(AdvisorError)` - A context file could not be read or parsed
pub async fn run(
    client: &CompletionClient,
    args: &AskArgs,
    retry_policy: &RetryPolicy,
) -> Result<CommandOutput, AdvisorError> {
    let context = build_context(args)?.render();
    debug!(
        "Asking with {} chars of context",
        context.as_deref().map(str::len).unwrap_or(0)
    );

    let result = if args.retry {
        complete_with_retry(client, &args.question, context.as_deref(), retry_policy).await
    } else {
        client.complete(&args.question, context.as_deref()).await
    };

    Ok(match result {
        Ok(reply) => {
            info!("Received reply ({} chars)", reply.len());
            CommandOutput::success(reply)
        }
        Err(error) => {
            warn!("Ask failed: {error}");
            CommandOutput::failure(error.user_message())
        }
    })
}

/// Assemble prompt context from the optional input files.
pub fn build_context(args: &AskArgs) -> Result<PromptContext, AdvisorError> {
    let mut context = PromptContext::new();

    if let Some(path) = &args.dataset {
        let table = SalesTable::from_json_str(&read_input(path)?)
            .map_err(|e| context_error(path, e))?;
        context = context.with_dataset(&table);
    }

    if let Some(path) = &args.forecast {
        let points = parse_forecast_json(&read_input(path)?).map_err(|e| context_error(path, e))?;
        context = context.with_forecast(&points, args.forecast_tail);
    }

    if let Some(path) = &args.context_file {
        context = context.with_text(read_input(path)?);
    }

    Ok(context)
}

#[track_caller]
fn read_input(path: &Path) -> Result<String, AdvisorError> {
    std::fs::read_to_string(path).map_err(|e| AdvisorError::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn context_error(path: &Path, error: ContextError) -> AdvisorError {
    warn!("Invalid context input {}: {}", path.display(), error);
    AdvisorError::Core(CoreError::Context(error))
}
