//! Opt-in retry with exponential backoff, layered above
//! [`CompletionClient::complete`].
//!
//! Only failures that [`CompletionError::is_retryable`] reports as transient
//! (rate limiting, timeouts, refused connections, 502/503/504) are retried.

use crate::completion_client::CompletionClient;
use crate::error::CompletionResult;

use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, warn};
use tokio::time::sleep as TokioSleep;

/// Configuration for the retry layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retries after the first attempt.
    pub max_retries: u32,
    /// Initial retry delay.
    pub initial_delay: Duration,
    /// Maximum retry delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_delay,
            current_interval: self.initial_delay,
            max_interval: self.max_delay,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

/// Call `complete`, retrying transient failures per `policy`.
///
/// Returns the first success, the first non-retryable failure, or the last
/// failure once retries are exhausted.
pub async fn complete_with_retry(
    client: &CompletionClient,
    prompt: &str,
    context: Option<&str>,
    policy: &RetryPolicy,
) -> CompletionResult {
    let mut backoff = policy.backoff();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let error = match client.complete(prompt, context).await {
            Ok(reply) => return Ok(reply),
            Err(error) => error,
        };

        if !error.is_retryable() {
            return Err(error);
        }

        if attempt > policy.max_retries {
            warn!(
                "Giving up after {attempt} attempts ({})",
                error.error_category()
            );
            return Err(error);
        }

        match backoff.next_backoff() {
            Some(delay) => {
                debug!(
                    "Attempt {attempt} failed ({}), retrying after {delay:?}",
                    error.error_category()
                );
                TokioSleep(delay).await;
            }
            None => return Err(error),
        }
    }
}
