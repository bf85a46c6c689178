use crate::commands::CommandOutput;

use advisor_core::{CompletionClient, SelfTestReport};

pub async fn run(client: &CompletionClient) -> CommandOutput {
    let report = client.self_test().await;
    let text = render_report(&report);

    if report.credential_valid() {
        CommandOutput::success(text)
    } else {
        CommandOutput::failure(text)
    }
}

pub fn render_report(report: &SelfTestReport) -> String {
    let credential = report
        .credential_preview
        .as_deref()
        .unwrap_or("(not configured)");

    let mut lines = vec![
        format!("Endpoint:   {}", report.base_url),
        format!("Model:      {}", report.model),
        format!("API key:    {credential}"),
    ];

    match &report.models {
        Ok(ids) => {
            lines.push(format!("Key check:  ok ({} models visible)", ids.len()));
            let availability = if report.model_available() {
                "available"
            } else {
                "NOT listed for this key"
            };
            lines.push(format!("Model check: {availability}"));
        }
        Err(error) => lines.push(format!("Key check:  failed\n{}", error.user_message())),
    }

    lines.join("\n")
}
