//! End-to-end tests for the OpenAI provider against a mock server.

use llm::{ChatProvider, Client, Error, Message, Tool};
use relay_openai::{OpenAI, endpoint};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn constructors_set_endpoints() {
    let client = Client::new();
    let api = OpenAI::api(client.clone(), "k", "gpt-4o").unwrap();
    assert_eq!(api.endpoint(), "https://api.openai.com/v1/chat/completions");

    let custom = OpenAI::custom(client.clone(), "k", "m", "http://localhost:9999/v1/").unwrap();
    assert_eq!(custom.endpoint(), "http://localhost:9999/v1/chat/completions");

    let ollama = OpenAI::ollama(client, "llama3", None);
    assert!(ollama.endpoint().starts_with(endpoint::OLLAMA));
    assert!(ollama.http().headers().get("authorization").is_none());
}

#[tokio::test]
async fn chat_completion_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "temperature": 0.2,
            "max_tokens": 64,
            "tools": [{"type": "function", "function": {"name": "clock"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-9",
            "choices": [{
                "message": {"role": "assistant", "content": null, "tool_calls": [
                    {"id": "call_1", "type": "function",
                     "function": {"name": "clock", "arguments": "{\"tz\":\"UTC\"}"}}
                ]},
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 7, "total_tokens": 27}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAI::custom(
        Client::new(),
        "sk-test",
        "gpt-4o",
        &format!("{}/v1", server.uri()),
    )
    .unwrap();
    let tools = [Tool::new("clock", "Current time in a timezone", json!({"type": "object"})).unwrap()];
    let response = provider
        .chat_completion(&[Message::user("time?")], Some(&tools), 0.2, 64)
        .await
        .unwrap();

    assert_eq!(response.id, "chatcmpl-9");
    let calls = response.tool_calls.expect("tool calls");
    assert_eq!(calls[0].name, "clock");
    assert_eq!(calls[0].parameters["tz"], "UTC");
    assert_eq!(response.usage.total_tokens, 27);
}

#[tokio::test]
async fn upstream_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":{"message":"bad key"}}"#),
        )
        .mount(&server)
        .await;

    let provider = OpenAI::custom(Client::new(), "bad", "gpt-4o", &server.uri()).unwrap();
    let err = provider
        .chat_completion(&[Message::user("hi")], None, 0.7, 16)
        .await
        .unwrap_err();
    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn validation_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OpenAI::custom(Client::new(), "k", "gpt-4o", &server.uri()).unwrap();

    let err = provider.chat_completion(&[], None, 0.7, 16).await.unwrap_err();
    assert!(matches!(err, Error::EmptyMessages));

    let mut broken = Message::tool("42", "call_1", "answer");
    broken.tool_call_id = None;
    let err = provider
        .chat_completion(&[Message::user("hi"), broken], None, 0.7, 16)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidToolMessage { .. }));

    let tool = Tool::new("dup", "duplicated", json!({})).unwrap();
    let err = provider
        .chat_completion(&[Message::user("hi")], Some(&[tool.clone(), tool]), 0.7, 16)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateTool(_)));
}

#[tokio::test]
async fn web_search_sends_plugin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"plugins": [{"id": "web"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "w",
            "choices": [{"message": {"content": "fresh"}, "finish_reason": "stop"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAI::custom(Client::new(), "k", "openai/gpt-4o", &server.uri())
        .unwrap()
        .with_web_search(true);
    let response = provider
        .chat_completion(&[Message::user("news")], None, 0.7, 16)
        .await
        .unwrap();
    assert_eq!(response.content(), "fresh");
}
