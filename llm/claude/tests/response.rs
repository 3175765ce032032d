//! Tests for Anthropic response decoding.

use llm::{Error, Message, ToolCall};
use relay_claude::{Request, decode};
use serde_json::{Map, json};

#[test]
fn text_blocks_concatenate_around_tool_use() {
    let body = json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4",
        "content": [
            {"type": "text", "text": "A"},
            {"type": "tool_use", "id": "t1", "name": "f", "input": {"x": 1}},
            {"type": "text", "text": "B"},
        ],
        "stop_reason": "tool_use",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    });
    let response = decode(&body.to_string()).unwrap();

    let mut params = Map::new();
    params.insert("x".into(), json!(1));
    assert_eq!(response.content(), "AB");
    assert_eq!(
        response.tool_calls,
        Some(vec![ToolCall::new("t1", "f", params).unwrap()])
    );
    assert_eq!(response.finish_reason.as_deref(), Some("tool_use"));
    assert_eq!(response.model.as_deref(), Some("claude-sonnet-4"));
}

#[test]
fn usage_is_renamed_and_summed() {
    let body = json!({
        "id": "msg_02",
        "content": [{"type": "text", "text": "ok"}],
        "stop_reason": "end_turn",
        "usage": {
            "input_tokens": 10,
            "output_tokens": 5,
            "cache_read_input_tokens": 7,
            "cache_creation_input_tokens": 0
        }
    });
    let usage = decode(&body.to_string()).unwrap().usage;

    assert_eq!(usage.prompt_tokens, 10);
    assert_eq!(usage.completion_tokens, 5);
    assert_eq!(usage.total_tokens, 15);
    assert_eq!(usage.extra["cache_read_input_tokens"], 7);
    assert!(!usage.extra.contains_key("input_tokens"));
}

#[test]
fn unknown_blocks_are_skipped() {
    let body = json!({
        "id": "msg_03",
        "content": [
            {"type": "server_tool_use", "id": "srv_1", "name": "web_search", "input": {"query": "rust"}},
            {"type": "web_search_tool_result", "tool_use_id": "srv_1", "content": []},
            {"type": "text", "text": "Rust 1.90 is out."},
        ],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 1, "output_tokens": 1}
    });
    let response = decode(&body.to_string()).unwrap();
    assert_eq!(response.content(), "Rust 1.90 is out.");
    assert!(!response.has_tool_calls());
}

#[test]
fn non_object_input_is_a_decode_error() {
    let body = json!({
        "id": "msg_04",
        "content": [{"type": "tool_use", "id": "t1", "name": "f", "input": [1, 2]}],
        "usage": {"input_tokens": 1, "output_tokens": 1}
    });
    let err = decode(&body.to_string()).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));

    let err = decode("<html>gateway</html>").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn encoded_assistant_turn_decodes_back_unchanged() {
    let mut params = Map::new();
    params.insert("city".into(), json!("Oslo"));
    params.insert("units".into(), json!({"temp": "c"}));
    let original = Message::assistant_with_tools(
        Some("Checking.".into()),
        vec![
            ToolCall::new("toolu_a", "weather", params).unwrap(),
            ToolCall::new("toolu_b", "clock", Map::new()).unwrap(),
        ],
    );

    let req = Request::new("claude", std::slice::from_ref(&original), None, 0.7, 16).unwrap();
    let body = json!({
        "id": "rt",
        "content": req.messages[0]["content"],
        "stop_reason": "tool_use",
        "usage": {"input_tokens": 0, "output_tokens": 0}
    });
    let decoded = decode(&body.to_string()).unwrap();

    assert_eq!(decoded.message, original);
}

#[test]
fn missing_id_or_usage_is_a_decode_error() {
    let bodies = [
        json!({"content": []}),
        json!({
            "content": [{"type": "text", "text": "hi"}],
            "usage": {"input_tokens": 1, "output_tokens": 1}
        }),
        json!({"id": "msg_05", "content": [{"type": "text", "text": "hi"}]}),
        json!({"id": "msg_05", "content": [], "usage": {"output_tokens": 1}}),
    ];
    for body in bodies {
        let err = decode(&body.to_string()).expect_err(&body.to_string());
        assert!(matches!(err, Error::Decode { .. }), "{body}: {err:?}");
    }
}

#[test]
fn usage_total_saturates() {
    let body = json!({
        "id": "msg_06",
        "content": [{"type": "text", "text": "long"}],
        "usage": {"input_tokens": u32::MAX, "output_tokens": 1}
    });
    let usage = decode(&body.to_string()).unwrap().usage;
    assert_eq!(usage.prompt_tokens, u32::MAX);
    assert_eq!(usage.completion_tokens, 1);
    assert_eq!(usage.total_tokens, u32::MAX);
}
