use crate::helpers::{COMPLETIONS_PATH, TEST_API_KEY, client_for, config_for_base, unreachable_base_url};

use advisor_core::{CompletionClient, FailureKind, RetryPolicy, complete_with_retry};

use common::RedactedApiKey;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

/// **VALUE**: Verifies a rate-limited call succeeds once the limit clears.
///
/// **WHY THIS MATTERS**: The retry layer exists for exactly this case. If it
/// gives up on the first 429, opting in buys nothing.
#[tokio::test]
async fn given_429_then_200_when_complete_with_retry_then_returns_reply() {
    // GIVEN: One 429, then success
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Stock up on rosé."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN: Completing with retries enabled
    let reply = complete_with_retry(&client, "q", None, &fast_policy(3)).await;

    // THEN: The second attempt's reply is returned
    assert_eq!(reply.unwrap(), "Stock up on rosé.");
}

/// **VALUE**: Verifies non-retryable failures are returned after one attempt.
///
/// **BUG THIS CATCHES**: Would catch the layer retrying a 401, which can
/// never succeed and burns through the retry budget.
#[tokio::test]
async fn given_401_when_complete_with_retry_then_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = complete_with_retry(&client, "q", None, &fast_policy(3))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Unauthorized);
}

#[tokio::test]
async fn given_persistent_429_when_complete_with_retry_then_gives_up_after_budget() {
    // 1 initial attempt + 2 retries
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = complete_with_retry(&client, "q", None, &fast_policy(2))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::RateLimited);
}

#[tokio::test]
async fn given_no_retry_policy_when_429_then_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = complete_with_retry(&client, "q", None, &RetryPolicy::none())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::RateLimited);
}

#[tokio::test]
async fn given_unreachable_endpoint_when_complete_with_retry_then_transport_after_retries() {
    let client = CompletionClient::new(
        &config_for_base(&unreachable_base_url()),
        Some(RedactedApiKey::new(TEST_API_KEY.to_string())),
    )
    .unwrap();

    let err = complete_with_retry(&client, "q", None, &fast_policy(2))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
}
