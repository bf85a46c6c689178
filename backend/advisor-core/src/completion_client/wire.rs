//! JSON bodies exchanged with the OpenAI-compatible completion endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of `POST chat/completions`. Built fresh for every call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

// Only `choices[0].message.content` is read; everything else is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelList {
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub id: String,
}

/// Pull the reply text out of a 200 body, or say why it can't be found.
pub(crate) fn extract_reply(body: &str) -> Result<String, String> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| format!("unexpected body shape: {e}"))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "response has no choices".to_string())?;

    choice
        .message
        .content
        .ok_or_else(|| "first choice has no message content".to_string())
}

pub(crate) fn extract_model_ids(body: &str) -> Result<Vec<String>, String> {
    let list: ModelList =
        serde_json::from_str(body).map_err(|e| format!("unexpected body shape: {e}"))?;
    Ok(list.data.into_iter().map(|m| m.id).collect())
}
