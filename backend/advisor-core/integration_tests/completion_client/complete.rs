use crate::helpers::{
    COMPLETIONS_PATH, TEST_API_KEY, TEST_MODEL, client_for, client_without_credential,
    config_for_base, unreachable_base_url,
};

use advisor_core::{CompletionClient, FailureKind};

use common::RedactedApiKey;

use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn success_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

/// **VALUE**: Verifies a blank prompt never reaches the network.
///
/// **WHY THIS MATTERS**: Every request costs quota. Sending whitespace gets a
/// useless answer and still counts against the rate limit.
///
/// **BUG THIS CATCHES**: Would catch the trim check moving after the send.
#[tokio::test]
async fn given_blank_prompts_when_complete_then_empty_prompt_without_request() {
    // GIVEN: A mock server that must receive zero requests
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN/THEN: Each blank prompt is rejected locally
    for prompt in ["", "   ", "\n\t  \n"] {
        let err = client.complete(prompt, Some("context")).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyPrompt, "prompt {prompt:?}");
    }
}

/// **VALUE**: Verifies a client without a credential never reaches the network.
///
/// **BUG THIS CATCHES**: Would catch an unauthenticated request being sent
/// (and answered with a confusing 401) when the key simply isn't configured.
#[tokio::test]
async fn given_no_credential_when_complete_then_missing_credential_without_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_without_credential(&server);

    for prompt in ["How will whiskey sell in Q4?", "", "   "] {
        let err = client.complete(prompt, None).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingCredential, "prompt {prompt:?}");
        assert_eq!(err.detail(), "GROQ_API_KEY");
    }
}

#[tokio::test]
async fn given_empty_credential_when_client_built_then_treated_as_missing() {
    let server = MockServer::start().await;
    let client = CompletionClient::new(
        &crate::helpers::config_for(&server),
        Some(RedactedApiKey::new("   ".to_string())),
    )
    .unwrap();

    assert!(!client.has_credential());
    let err = client.complete("question", None).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::MissingCredential);
}

/// **VALUE**: Verifies the happy path returns `choices[0].message.content`.
#[tokio::test]
async fn given_200_with_content_when_complete_then_returns_reply_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Demand for whiskey is rising."}}]
            })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let reply = client.complete("any prompt", None).await.unwrap();

    assert_eq!(reply, "Demand for whiskey is rising.");
}

/// **VALUE**: Verifies headers and body match the endpoint's contract.
///
/// **WHY THIS MATTERS**: A missing `Bearer ` prefix or a renamed field is a
/// 401/400 in production that no status-mapping test would notice.
#[tokio::test]
async fn given_prompt_and_context_when_complete_then_sends_expected_request() {
    let server = MockServer::start().await;
    let auth_value = format!("Bearer {TEST_API_KEY}");
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", auth_value.as_str()))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": TEST_MODEL,
            "temperature": 0.7,
            "max_tokens": 512,
            "messages": [
                {"role": "system", "content": "You are a helpful AI advisor for liquor demand forecasting."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let reply = client
        .complete("  Forecast wine for December  ", Some("Wine mean 80"))
        .await
        .unwrap();
    assert_eq!(reply, "ok");

    // The user message carries both the context and the trimmed question
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["role"], "user");
    let user_content = messages[1]["content"].as_str().unwrap();
    assert!(user_content.contains("Dataset summary:\nWine mean 80"));
    assert!(user_content.ends_with("Question:\nForecast wine for December"));
}

#[tokio::test]
async fn given_400_when_complete_then_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": {"message": "max_tokens too large"}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::BadRequest);
    assert!(err.detail().contains("max_tokens too large"));
}

/// **VALUE**: Verifies 401 maps to Unauthorized whatever the body holds.
///
/// **BUG THIS CATCHES**: Would catch body parsing running before the status
/// check and turning an HTML or empty 401 into a different failure.
#[tokio::test]
async fn given_401_with_any_body_when_complete_then_unauthorized() {
    let bodies = [
        ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Invalid API Key"}})),
        ResponseTemplate::new(401).set_body_string("<html>denied</html>"),
        ResponseTemplate::new(401),
    ];

    for template in bodies {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(template)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("q", None).await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Unauthorized);
        assert_eq!(err.status_code(), Some(401));
    }
}

#[tokio::test]
async fn given_429_when_complete_then_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "2")
                .set_body_json(json!({"error": {"message": "Rate limit reached"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::RateLimited);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn given_other_status_with_json_when_complete_then_api_error_with_pretty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": {"message": "model `x` does not exist"}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::ApiError);
    assert_eq!(err.status_code(), Some(404));
    assert!(err.detail().contains("\"message\": \"model `x` does not exist\""));
}

#[tokio::test]
async fn given_other_status_with_text_when_complete_then_api_error_with_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::ApiError);
    assert_eq!(err.detail(), "upstream overloaded");
    assert!(err.user_message().contains("HTTP 503"));
}

/// **VALUE**: Verifies a 200 without `choices` is a classified failure.
///
/// **BUG THIS CATCHES**: Would catch an index/unwrap on the response shape
/// that panics when a proxy returns an unexpected 200 body.
#[tokio::test]
async fn given_200_without_choices_when_complete_then_malformed_response() {
    let server = MockServer::start().await;
    let body = json!({"id": "chatcmpl-1", "object": "chat.completion"});
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::MalformedResponse);
    let raw: serde_json::Value = serde_json::from_str(err.detail()).unwrap();
    assert_eq!(raw, body, "Detail carries the raw body");
}

#[tokio::test]
async fn given_200_with_non_json_body_when_complete_then_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captive portal</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::MalformedResponse);
    assert_eq!(err.detail(), "<html>captive portal</html>");
}

/// **VALUE**: Verifies a refused connection becomes a Transport failure.
///
/// **WHY THIS MATTERS**: An offline laptop must get "service unreachable",
/// not a crash.
#[tokio::test]
async fn given_unreachable_endpoint_when_complete_then_transport_failure() {
    let client = CompletionClient::new(
        &config_for_base(&unreachable_base_url()),
        Some(RedactedApiKey::new(TEST_API_KEY.to_string())),
    )
    .unwrap();

    let err = client.complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(err.is_retryable(), "Connection failures are retryable");
    assert!(err.user_message().contains("unreachable"));
}

#[tokio::test]
async fn given_slow_endpoint_and_timeout_when_complete_then_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("late"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let mut config = crate::helpers::config_for(&server);
    config.timeout_secs = Some(1);
    let client =
        CompletionClient::new(&config, Some(RedactedApiKey::new(TEST_API_KEY.to_string())))
            .unwrap();

    let err = client.complete("q", None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert_eq!(err.error_category(), "timeout");
}
