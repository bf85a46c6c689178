// ============================================================================
// Integration tests for command dispatch against a mock completion endpoint
// ============================================================================

use advisor::cli::{AskArgs, Command};
use advisor::commands::{CommandOutput, dispatch};
use advisor::error::AdvisorError;

use advisor_core::{AdvisorConfig, CompletionClient};

use common::RedactedApiKey;

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_API_KEY: &str = "gsk_test_4fQ9mZ2pLx7Rt1VbN8";

fn config_for(server: &MockServer) -> AdvisorConfig {
    let mut config = AdvisorConfig::default();
    config.completion.base_url = format!("{}/openai/v1/", server.uri());
    config.retry.initial_delay_ms = 1;
    config.retry.max_delay_ms = 5;
    config
}

fn client_for(config: &AdvisorConfig, with_key: bool) -> CompletionClient {
    let credential = with_key.then(|| RedactedApiKey::new(TEST_API_KEY.to_string()));
    CompletionClient::new(&config.completion, credential).expect("Failed to build client")
}

fn ask(question: &str) -> AskArgs {
    AskArgs {
        question: question.to_string(),
        context_file: None,
        dataset: None,
        forecast: None,
        forecast_tail: 3,
        retry: false,
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// **VALUE**: Tests the full ask path: files → context → request → reply.
///
/// **WHY THIS MATTERS**: This is the closest we get to an end-to-end run without
/// the real endpoint. It proves the dataset and forecast files actually reach
/// the user message.
#[tokio::test]
async fn given_dataset_and_forecast_when_ask_then_context_sent_and_reply_returned() {
    // GIVEN: Mock endpoint and input files
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Wine demand peaks in December."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let dataset = write_file(
        &dir,
        "sales.json",
        r#"{"categories":["Beer","Wine"],"rows":[
            {"period":"Jan","values":[100,50]},
            {"period":"Feb","values":[120,70]}
        ]}"#,
    );
    let forecast = write_file(
        &dir,
        "forecast.json",
        r#"[{"period":"2024-11","estimate":80.5,"lower":70.0,"upper":91.0},
            {"period":"2024-12","estimate":95.25,"lower":82.0,"upper":108.5}]"#,
    );
    let config = config_for(&server);
    let client = client_for(&config, true);
    let mut args = ask("Forecast wine sales in December");
    args.dataset = Some(dataset);
    args.forecast = Some(forecast);

    // WHEN: Dispatching the ask command
    let output = dispatch(&Command::Ask(args), &client, &config).await.unwrap();

    // THEN: The reply is returned and the context was sent
    assert_eq!(output, CommandOutput::success("Wine demand peaks in December."));
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_content = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_content.contains("Sales statistics:"));
    assert!(user_content.contains("Wine"));
    assert!(user_content.contains("2024-12"));
    assert!(user_content.contains("95.25"));
}

#[tokio::test]
async fn given_no_key_when_ask_then_failure_output_names_env_var() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    let client = client_for(&config, false);

    let output = dispatch(&Command::Ask(ask("q")), &client, &config).await.unwrap();

    assert!(!output.success);
    assert!(output.text.contains("GROQ_API_KEY"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_retry_flag_and_429_then_200_when_ask_then_reply_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "ok"}}]
        })))
        .mount(&server)
        .await;
    let config = config_for(&server);
    let client = client_for(&config, true);
    let mut args = ask("q");
    args.retry = true;

    let output = dispatch(&Command::Ask(args), &client, &config).await.unwrap();

    assert_eq!(output, CommandOutput::success("ok"));
}

/// **VALUE**: Verifies a missing input file is a local error, not a request.
#[tokio::test]
async fn given_missing_context_file_when_ask_then_input_error() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    let client = client_for(&config, true);
    let mut args = ask("q");
    args.context_file = Some(PathBuf::from("/nonexistent/notes.txt"));

    let result = dispatch(&Command::Ask(args), &client, &config).await;

    assert!(matches!(result, Err(AdvisorError::Input { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_models_listing_when_models_command_then_one_id_per_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openai/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "llama3-8b-8192"}, {"id": "llama-3.1-8b-instant"}]
        })))
        .mount(&server)
        .await;
    let config = config_for(&server);
    let client = client_for(&config, true);

    let output = dispatch(&Command::Models, &client, &config).await.unwrap();

    assert_eq!(
        output,
        CommandOutput::success("llama3-8b-8192\nllama-3.1-8b-instant")
    );
}

#[tokio::test]
async fn given_valid_key_when_self_test_command_then_report_masks_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openai/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "llama-3.1-8b-instant"}]
        })))
        .mount(&server)
        .await;
    let config = config_for(&server);
    let client = client_for(&config, true);

    let output = dispatch(&Command::SelfTest, &client, &config).await.unwrap();

    assert!(output.success);
    assert!(output.text.contains("gsk_****"));
    assert!(!output.text.contains(TEST_API_KEY));
    assert!(output.text.contains("available"));
}
