use super::wire::ChatMessage;

const ADVISOR_PREAMBLE: &str = "You are an AI advisor for liquor demand planning.\n\
Use the dataset summary and forecast data below to answer the question.";

/// Compose the user message. Without context the prompt is sent as-is.
pub(crate) fn compose_user_content(prompt: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!(
            "{ADVISOR_PREAMBLE}\n\nDataset summary:\n{context}\n\nQuestion:\n{prompt}"
        ),
        None => prompt.to_string(),
    }
}

pub(crate) fn build_messages(
    system_prompt: &str,
    prompt: &str,
    context: Option<&str>,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(compose_user_content(prompt, context)),
    ]
}
