pub mod completion_client;
pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod retry;

#[cfg(test)]
mod tests;

pub use completion_client::{CompletionClient, SelfTestReport};
pub use config::{AdvisorConfig, CompletionConfig, RetrySettings};
pub use context::PromptContext;
pub use error::{CompletionError, CompletionResult, FailureKind};
pub use retry::{RetryPolicy, complete_with_retry};

pub const GROQ_API_HOSTNAME: &str = "api.groq.com";
pub const GROQ_API_BASE_URL: &str =
    const_format::concatcp!("https://", GROQ_API_HOSTNAME, "/openai/v1/");
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI advisor for liquor demand forecasting.";
