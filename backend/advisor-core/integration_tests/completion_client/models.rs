use crate::helpers::{
    MODELS_PATH, TEST_API_KEY, client_for, client_without_credential, config_for_base,
    unreachable_base_url,
};

use advisor_core::{CompletionClient, FailureKind};

use common::RedactedApiKey;

use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_models_listing_when_list_available_models_then_returns_ids() {
    let server = MockServer::start().await;
    let auth_value = format!("Bearer {TEST_API_KEY}");
    Mock::given(method("GET"))
        .and(path(MODELS_PATH))
        .and(header("authorization", auth_value.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "llama3-8b-8192"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ids = client_for(&server).list_available_models().await.unwrap();

    assert_eq!(ids, vec!["llama3-8b-8192".to_string()]);
}

#[tokio::test]
async fn given_no_credential_when_list_available_models_then_missing_credential() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_without_credential(&server)
        .list_available_models()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::MissingCredential);
}

/// **VALUE**: Verifies the listing shares the completion status table.
///
/// **BUG THIS CATCHES**: Would catch the models path growing its own
/// mapping that drifts from `complete`.
#[tokio::test]
async fn given_error_statuses_when_list_available_models_then_same_mapping_as_complete() {
    let cases: [(u16, FailureKind); 3] = [
        (401, FailureKind::Unauthorized),
        (429, FailureKind::RateLimited),
        (500, FailureKind::ApiError),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MODELS_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let err = client_for(&server).list_available_models().await.unwrap_err();

        assert_eq!(err.kind(), expected, "HTTP {status}");
    }
}

#[tokio::test]
async fn given_200_without_data_when_list_available_models_then_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).list_available_models().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn given_unreachable_endpoint_when_list_available_models_then_transport_failure() {
    let client = CompletionClient::new(
        &config_for_base(&unreachable_base_url()),
        Some(RedactedApiKey::new(TEST_API_KEY.to_string())),
    )
    .unwrap();

    let err = client.list_available_models().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
}
