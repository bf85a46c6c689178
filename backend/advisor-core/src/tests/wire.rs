// Unit tests for completion wire format handling

use crate::completion_client::wire::{
    ChatMessage, CompletionRequest, extract_model_ids, extract_reply,
};

use serde_json::json;

/// **VALUE**: Verifies the request body matches the endpoint's expected shape.
///
/// **BUG THIS CATCHES**: Would catch a serde rename slip (e.g. `maxTokens`, or
/// roles serialized as `"System"`) that the endpoint rejects with a 400.
#[test]
fn given_request_when_serialized_then_matches_wire_shape() {
    let request = CompletionRequest {
        model: "llama-3.1-8b-instant".to_string(),
        messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
        temperature: 0.7,
        max_tokens: 512,
    };

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        value,
        json!({
            "model": "llama-3.1-8b-instant",
            "messages": [
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "hi"}
            ],
            "temperature": 0.7,
            "max_tokens": 512
        })
    );
}

#[test]
fn given_success_body_when_extract_reply_then_returns_first_choice_content() {
    let body = r#"{"id":"x","choices":[
        {"index":0,"message":{"role":"assistant","content":"first"}},
        {"index":1,"message":{"role":"assistant","content":"second"}}
    ]}"#;

    assert_eq!(extract_reply(body).unwrap(), "first");
}

/// **VALUE**: Verifies every missing link in `choices[0].message.content`
/// is reported instead of panicking.
#[test]
fn given_incomplete_bodies_when_extract_reply_then_returns_reason() {
    let bodies = [
        r#"{"object":"chat.completion"}"#,
        r#"{"choices":[]}"#,
        r#"{"choices":[{"index":0}]}"#,
        r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        "<html>gateway</html>",
        "",
    ];

    for body in bodies {
        assert!(extract_reply(body).is_err(), "Expected failure for {body:?}");
    }
}

#[test]
fn given_models_body_when_extract_model_ids_then_returns_ids_in_order() {
    let body = r#"{"object":"list","data":[{"id":"b","object":"model"},{"id":"a"}]}"#;

    assert_eq!(extract_model_ids(body).unwrap(), vec!["b", "a"]);
}

#[test]
fn given_models_body_without_data_when_extract_model_ids_then_fails() {
    assert!(extract_model_ids(r#"{"models":[]}"#).is_err());
}
