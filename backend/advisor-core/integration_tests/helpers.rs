//! Test helpers for completion client integration tests.
//!
//! Every test talks to a local `wiremock` server; nothing reaches the
//! real completion endpoint.

use advisor_core::{CompletionClient, CompletionConfig};

use common::RedactedApiKey;

use std::net::TcpListener;

use wiremock::MockServer;

/// Test credential; never a real key.
pub const TEST_API_KEY: &str = "gsk_test_4fQ9mZ2pLx7Rt1VbN8";
pub const TEST_MODEL: &str = "llama3-8b-8192";
pub const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
pub const MODELS_PATH: &str = "/openai/v1/models";

/// Completion settings pointing at the mock server.
pub fn config_for(server: &MockServer) -> CompletionConfig {
    config_for_base(&format!("{}/openai/v1", server.uri()))
}

pub fn config_for_base(base_url: &str) -> CompletionConfig {
    CompletionConfig {
        base_url: base_url.to_string(),
        model: TEST_MODEL.to_string(),
        ..CompletionConfig::default()
    }
}

/// Client with the test credential loaded.
pub fn client_for(server: &MockServer) -> CompletionClient {
    CompletionClient::new(
        &config_for(server),
        Some(RedactedApiKey::new(TEST_API_KEY.to_string())),
    )
    .expect("Failed to build completion client")
}

/// Client with no credential loaded.
pub fn client_without_credential(server: &MockServer) -> CompletionClient {
    CompletionClient::new(&config_for(server), None).expect("Failed to build completion client")
}

/// A localhost base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}/openai/v1/")
}
