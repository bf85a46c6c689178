//! Client for a hosted, OpenAI-compatible chat-completion endpoint.
//!
//! One call in, one HTTP request out, one classified result back. The
//! client never retries on its own; see [`crate::retry`] for the opt-in
//! retry layer.

pub(crate) mod prompt;
pub mod wire;

pub use wire::{ChatMessage, CompletionRequest, Role};

use crate::config::CompletionConfig;
use crate::error::{CompletionError, CompletionResult, ConfigError};

use common::{ErrorLocation, HttpStatusCode, RedactedApiKey};

use std::panic::Location;
use std::time::Instant;

use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder};
use url::Url;

const CHAT_COMPLETIONS_ENDPOINT: &str = "chat/completions";
const MODELS_ENDPOINT: &str = "models";
const CREDENTIAL_PREVIEW_CHARS: usize = 4;

#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    completions_url: Url,
    models_url: Url,
    config: CompletionConfig,
    credential: Option<RedactedApiKey>,
}

/// Outcome of [`CompletionClient::self_test`].
#[derive(Debug)]
pub struct SelfTestReport {
    pub base_url: String,
    pub model: String,
    /// Masked credential prefix, e.g. `gsk_****`. `None` when no credential is loaded.
    pub credential_preview: Option<String>,
    pub models: Result<Vec<String>, CompletionError>,
}

impl SelfTestReport {
    /// The credential was accepted by the models endpoint.
    pub fn credential_valid(&self) -> bool {
        self.models.is_ok()
    }

    /// The configured model appears in the listing.
    pub fn model_available(&self) -> bool {
        self.models
            .as_ref()
            .map(|ids| ids.iter().any(|id| id == &self.model))
            .unwrap_or(false)
    }
}

impl CompletionClient {
    /// Build a client from explicit settings and an already-loaded credential.
    ///
    /// A `None` credential is accepted; calls then fail with
    /// `MissingCredential` instead of reaching the network.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        config: &CompletionConfig,
        credential: Option<RedactedApiKey>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let base_url = config.endpoint_base()?;
        let completions_url = join_endpoint(&base_url, CHAT_COMPLETIONS_ENDPOINT)?;
        let models_url = join_endpoint(&base_url, MODELS_ENDPOINT)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::ClientBuild {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            completions_url,
            models_url,
            config: config.clone(),
            credential: credential.filter(|key| !key.is_empty()),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Build the request body `complete` would send for this input.
    pub fn build_request(&self, prompt: &str, context: Option<&str>) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: prompt::build_messages(&self.config.system_prompt, prompt.trim(), context),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Ask the completion endpoint a question.
    ///
    /// Checks run before any network traffic: a missing credential wins over a
    /// blank prompt, so an unconfigured client reports `MissingCredential`
    /// for every input.
    ///
    /// # Errors
    /// Every failure is returned as a [`CompletionError`]; see
    /// [`CompletionError::kind`] for the categories.
    pub async fn complete(&self, prompt: &str, context: Option<&str>) -> CompletionResult {
        let Some(credential) = self.credential.as_ref() else {
            warn!("Completion skipped: {} is not set", self.config.api_key_env);
            return Err(CompletionError::missing_credential(&self.config.api_key_env));
        };

        if prompt.trim().is_empty() {
            debug!("Completion skipped: blank prompt");
            return Err(CompletionError::empty_prompt());
        }

        let request = self.build_request(prompt, context);
        debug!(
            "Sending completion request: model={}, context={} chars, max_tokens={}",
            request.model,
            context.map(str::len).unwrap_or(0),
            request.max_tokens
        );

        let started = Instant::now();
        let (status, body) = self
            .execute(
                self.client
                    .post(self.completions_url.clone())
                    .bearer_auth(credential.as_str())
                    .json(&request),
            )
            .await?;
        debug!("Completion responded HTTP {status} in {:?}", started.elapsed());

        if !status.is_ok() {
            let error = CompletionError::from_status(status.0, body);
            warn!("Completion failed ({}): HTTP {}", error.error_category(), status);
            return Err(error);
        }

        wire::extract_reply(&body).map_err(|reason| {
            warn!("Completion response malformed: {reason}");
            CompletionError::malformed_response(reason, body.clone())
        })
    }

    /// List model ids visible to the configured credential.
    ///
    /// Used as a credential check; has the same failure handling as
    /// [`Self::complete`].
    pub async fn list_available_models(&self) -> Result<Vec<String>, CompletionError> {
        let Some(credential) = self.credential.as_ref() else {
            return Err(CompletionError::missing_credential(&self.config.api_key_env));
        };

        let (status, body) = self
            .execute(
                self.client
                    .get(self.models_url.clone())
                    .bearer_auth(credential.as_str()),
            )
            .await?;

        if !status.is_ok() {
            return Err(CompletionError::from_status(status.0, body));
        }

        let ids = wire::extract_model_ids(&body)
            .map_err(|reason| CompletionError::malformed_response(reason, body.clone()))?;
        info!("Models endpoint listed {} models", ids.len());
        Ok(ids)
    }

    /// Diagnostic: report settings, a masked credential preview, and whether
    /// the models endpoint accepts the credential.
    pub async fn self_test(&self) -> SelfTestReport {
        let credential_preview = self
            .credential
            .as_ref()
            .map(|key| key.masked_preview(CREDENTIAL_PREVIEW_CHARS));

        SelfTestReport {
            base_url: self.config.base_url.clone(),
            model: self.config.model.clone(),
            credential_preview,
            models: self.list_available_models().await,
        }
    }

    /// Send one request and read the whole body. Any failure before a
    /// status line and body are in hand is a transport failure.
    async fn execute(
        &self,
        request: RequestBuilder,
    ) -> Result<(HttpStatusCode, String), CompletionError> {
        let response = request.send().await.map_err(|e| {
            warn!("Completion transport failure: {e}");
            CompletionError::from_reqwest(&e)
        })?;

        let status = HttpStatusCode::from(response.status().as_u16());
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::from_reqwest(&e))?;

        Ok((status, body))
    }
}

#[track_caller]
fn join_endpoint(base_url: &Url, endpoint: &str) -> Result<Url, ConfigError> {
    base_url
        .join(endpoint)
        .map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Cannot join '{endpoint}' onto {base_url}: {e}"),
        })
}
