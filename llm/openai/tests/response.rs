//! Tests for OpenAI response decoding.

use llm::{Error, Message, ToolCall};
use relay_openai::{Request, decode};
use serde_json::{Map, json};

#[test]
fn decodes_text_reply_and_usage() {
    let body = json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hello!"},
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 9,
            "completion_tokens": 3,
            "total_tokens": 12,
            "prompt_tokens_details": {"cached_tokens": 0}
        }
    });
    let response = decode(&body.to_string()).unwrap();

    assert_eq!(response.id, "chatcmpl-1");
    assert_eq!(response.model.as_deref(), Some("gpt-4o-2024-08-06"));
    assert_eq!(response.content(), "Hello!");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert!(response.tool_calls.is_none());
    assert_eq!(response.usage.prompt_tokens, 9);
    assert_eq!(response.usage.completion_tokens, 3);
    assert_eq!(response.usage.total_tokens, 12);
    assert_eq!(
        response.usage.extra["prompt_tokens_details"]["cached_tokens"],
        0
    );
}

#[test]
fn decodes_tool_calls_with_parsed_arguments() {
    let body = json!({
        "id": "chatcmpl-2",
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    {"id": "call_a", "type": "function",
                     "function": {"name": "lookup", "arguments": "{\"city\":\"Oslo\"}"}},
                    {"id": "call_b", "type": "function",
                     "function": {"name": "now", "arguments": ""}}
                ]
            },
            "finish_reason": "tool_calls"
        }]
    });
    let response = decode(&body.to_string()).unwrap();

    let calls = response.tool_calls.as_ref().expect("tool calls");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].id, "call_a");
    assert_eq!(calls[0].name, "lookup");
    assert_eq!(calls[0].parameters["city"], "Oslo");
    assert!(calls[1].parameters.is_empty());
    assert_eq!(&response.message.tool_calls, calls);
    assert_eq!(response.content(), "");
    assert_eq!(response.finish_reason.as_deref(), Some("tool_calls"));
}

#[test]
fn missing_usage_is_zeroed_and_total_is_computed() {
    let body = json!({
        "id": "x",
        "choices": [{"message": {"content": "ok"}, "finish_reason": "stop"}]
    });
    assert_eq!(decode(&body.to_string()).unwrap().usage.total_tokens, 0);

    let body = json!({
        "id": "x",
        "choices": [{"message": {"content": "ok"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 4, "completion_tokens": 6}
    });
    assert_eq!(decode(&body.to_string()).unwrap().usage.total_tokens, 10);
}

#[test]
fn unexpected_shapes_are_decode_errors() {
    for body in [
        "not json".to_string(),
        json!({"id": "x"}).to_string(),
        json!({"id": "x", "choices": []}).to_string(),
        json!({"id": "x", "choices": [{"message": {"tool_calls": [
            {"id": "c", "function": {"name": "f", "arguments": "[1,2]"}}
        ]}}]})
        .to_string(),
        json!({"id": "x", "choices": [{"message": {"tool_calls": [
            {"id": "c", "function": {"name": "f", "arguments": "{broken"}}
        ]}}]})
        .to_string(),
        json!({"id": "x", "choices": [{"message": {"tool_calls": [
            {"id": "", "function": {"name": "f", "arguments": "{}"}}
        ]}}]})
        .to_string(),
    ] {
        let err = decode(&body).expect_err(&body);
        assert!(matches!(err, Error::Decode { .. }), "{body}: {err:?}");
    }
}

#[test]
fn encoded_assistant_turn_decodes_back_unchanged() {
    let mut params = Map::new();
    params.insert("value".into(), json!(10));
    params.insert("tags".into(), json!(["a", "b"]));
    let calls = vec![
        ToolCall::new("call_1", "tool_a", params).unwrap(),
        ToolCall::new("call_2", "tool_b", Map::new()).unwrap(),
    ];
    let original = Message::assistant_with_tools(Some("thinking".into()), calls);

    let req = Request::new("gpt-4o", std::slice::from_ref(&original), None, 0.7, 16).unwrap();
    let wire = serde_json::to_value(&req.messages[0]).unwrap();
    let body = json!({
        "id": "rt",
        "choices": [{"message": wire, "finish_reason": "tool_calls"}]
    });
    let decoded = decode(&body.to_string()).unwrap();

    assert_eq!(decoded.message, original);
}

#[test]
fn missing_id_is_a_decode_error() {
    for body in [
        json!({"choices": [{"message": {}}]}),
        json!({"choices": [{"message": {"content": "ok"}, "finish_reason": "stop"}]}),
    ] {
        let err = decode(&body.to_string()).expect_err(&body.to_string());
        assert!(matches!(err, Error::Decode { .. }), "{body}: {err:?}");
    }
}

#[test]
fn computed_total_saturates() {
    let body = json!({
        "id": "big",
        "choices": [{"message": {"content": "ok"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": u32::MAX, "completion_tokens": 7}
    });
    let usage = decode(&body.to_string()).unwrap().usage;
    assert_eq!(usage.prompt_tokens, u32::MAX);
    assert_eq!(usage.total_tokens, u32::MAX);
}
