// tests/serve_protocol.rs
// Exercises the framed JSON protocol end to end over in-memory streams

use outline_tree::controller::{MemoryClipboard, MemoryStore, UiController};
use outline_tree::serve::ServeServer;
use serde_json::{json, Value};
use std::io::Cursor;

fn frame(value: &Value) -> String {
    let body = value.to_string();
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body)
}

fn request(seq: u64, command: &str, arguments: Option<Value>) -> String {
    let mut msg = json!({ "seq": seq, "type": "request", "command": command });
    if let Some(args) = arguments {
        msg["arguments"] = args;
    }
    frame(&msg)
}

// Split the server's output back into JSON messages
fn parse_frames(bytes: &[u8]) -> Vec<Value> {
    let text = std::str::from_utf8(bytes).expect("frames are utf-8");
    let mut rest = text;
    let mut messages = Vec::new();
    while let Some(header_end) = rest.find("\r\n\r\n") {
        let header = &rest[..header_end];
        let len: usize = header
            .trim_start_matches("Content-Length:")
            .trim()
            .parse()
            .expect("numeric Content-Length");
        let body_start = header_end + 4;
        let body = &rest[body_start..body_start + len];
        messages.push(serde_json::from_str(body).expect("valid JSON body"));
        rest = &rest[body_start + len..];
    }
    messages
}

fn run_session(input: String, clipboard: MemoryClipboard) -> Vec<Value> {
    let ui = UiController::new(MemoryStore::new(), clipboard);
    let mut server = ServeServer::new(Cursor::new(input.into_bytes()), Vec::new(), ui);
    server.run().expect("session runs to completion");
    parse_frames(&server.into_writer())
}

fn find_response<'a>(messages: &'a [Value], request_seq: u64) -> &'a Value {
    messages
        .iter()
        .find(|m| m["type"] == "response" && m["request_seq"] == request_seq)
        .expect("response present")
}

fn rendered_events(messages: &[Value]) -> Vec<&Value> {
    messages
        .iter()
        .filter(|m| m["type"] == "event" && m["event"] == "rendered")
        .collect()
}

#[test]
fn test_initialize_then_set_input() {
    let input = [
        request(1, "initialize", None),
        request(2, "setInput", Some(json!({ "text": "/\n a\n  x\n b" }))),
        request(3, "setOptions", Some(json!({ "appendSlash": true }))),
        request(4, "disconnect", None),
    ]
    .concat();

    let messages = run_session(input, MemoryClipboard::new());

    assert_eq!(find_response(&messages, 1)["body"]["supportsNewline"], true);
    assert!(messages.iter().any(|m| m["event"] == "initialized"));

    let rendered = rendered_events(&messages);
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0]["body"]["output"], "/\n├─ a\n│  └─ x\n└─ b\n");
    assert_eq!(rendered[1]["body"]["output"], "/\n├─ a/\n│  └─ x\n└─ b\n");
    assert_eq!(find_response(&messages, 3)["body"]["appendSlash"], true);
    assert_eq!(find_response(&messages, 4)["success"], true);
}

#[test]
fn test_sequence_numbers_increase() {
    let input = [request(1, "initialize", None), request(2, "load", None)].concat();
    let messages = run_session(input, MemoryClipboard::new());

    let seqs: Vec<u64> = messages.iter().map(|m| m["seq"].as_u64().unwrap()).collect();
    let expected: Vec<u64> = (1..=seqs.len() as u64).collect();
    assert_eq!(seqs, expected);
}

#[test]
fn test_newline_returns_text_and_cursor() {
    let input = request(1, "newline", Some(json!({ "text": "/\n src", "cursor": 6 })));
    let messages = run_session(input, MemoryClipboard::new());

    let body = &find_response(&messages, 1)["body"];
    assert_eq!(body["text"], "/\n src\n ");
    assert_eq!(body["cursor"], 8);
}

#[test]
fn test_copy_failure_is_reported_in_response_and_status() {
    let input = [
        request(1, "setInput", Some(json!({ "text": "/\n a" }))),
        request(2, "copy", None),
    ]
    .concat();
    let messages = run_session(input, MemoryClipboard::denied());

    let response = find_response(&messages, 2);
    assert_eq!(response["success"], false);
    assert!(response["message"].as_str().unwrap().contains("permission denied"));

    let rendered = rendered_events(&messages);
    let last = rendered.last().unwrap();
    assert!(last["body"]["status"].as_str().unwrap().starts_with("Copy failed"));
    assert_eq!(last["body"]["output"], "/\n└─ a\n");
}

#[test]
fn test_scroll_reports_other_pane_position() {
    let metrics = json!({
        "input": { "scrollTop": 0.0, "scrollHeight": 300.0, "clientHeight": 100.0 },
        "output": { "scrollTop": 0.0, "scrollHeight": 500.0, "clientHeight": 100.0 },
        "pane": "input",
        "top": 100.0,
    });
    let messages = run_session(request(1, "scroll", Some(metrics)), MemoryClipboard::new());

    let body = &find_response(&messages, 1)["body"];
    assert_eq!(body["pane"], "output");
    assert_eq!(body["top"], 200.0);
}

#[test]
fn test_stateless_render() {
    let args = json!({ "text": " /\n  a\n   b", "appendSlash": true, "literalRoot": true });
    let messages = run_session(request(1, "render", Some(args)), MemoryClipboard::new());

    assert_eq!(
        find_response(&messages, 1)["body"]["output"],
        "/\n└─ a/\n   └─ b\n"
    );
    assert!(rendered_events(&messages).is_empty());
}

#[test]
fn test_bad_arguments_and_unknown_commands() {
    let input = [
        request(1, "setInput", Some(json!({ "txt": "oops" }))),
        request(2, "frobnicate", None),
        request(3, "setInput", Some(json!({ "text": "ok" }))),
    ]
    .concat();
    let messages = run_session(input, MemoryClipboard::new());

    assert_eq!(find_response(&messages, 1)["success"], false);
    assert_eq!(find_response(&messages, 2)["success"], false);
    assert_eq!(find_response(&messages, 3)["success"], true);
}

#[test]
fn test_malformed_frame_is_skipped() {
    let garbage = "Content-Length: 5\r\n\r\nnope!";
    let input = [garbage.to_string(), request(1, "setInput", Some(json!({ "text": "x" })))].concat();
    let messages = run_session(input, MemoryClipboard::new());

    assert_eq!(find_response(&messages, 1)["success"], true);
    assert_eq!(rendered_events(&messages)[0]["body"]["output"], "x\n");
}

#[test]
fn test_unparsable_content_length_does_not_swallow_next_frame() {
    let garbage = "Content-Length: abc\r\n\r\n{\"x\":1}";
    let input = [garbage.to_string(), request(1, "setInput", Some(json!({ "text": "x" })))].concat();
    let messages = run_session(input, MemoryClipboard::new());

    assert_eq!(find_response(&messages, 1)["success"], true);
    assert_eq!(rendered_events(&messages)[0]["body"]["output"], "x\n");
}

#[test]
fn test_oversized_frame_is_rejected_and_session_continues() {
    let huge = format!("Content-Length: {}\r\n\r\n{{}}", u64::MAX);
    let input = [
        huge,
        "Content-Length: 20000000\r\n\r\n{}".to_string(),
        request(1, "setInput", Some(json!({ "text": "x" }))),
    ]
    .concat();
    let messages = run_session(input, MemoryClipboard::new());

    assert_eq!(find_response(&messages, 1)["success"], true);
    assert_eq!(rendered_events(&messages)[0]["body"]["output"], "x\n");
}

#[test]
fn test_only_request_messages_are_dispatched() {
    let stray_response = json!({
        "seq": 1,
        "type": "response",
        "request_seq": 9,
        "success": true,
        "command": "setInput",
        "arguments": { "text": "boom" },
    });
    let stray_event = json!({ "seq": 2, "type": "event", "event": "rendered", "command": "reset" });
    let input = [frame(&stray_response), frame(&stray_event)].concat();

    let ui = UiController::new(MemoryStore::new(), MemoryClipboard::new());
    let mut server = ServeServer::new(Cursor::new(input.into_bytes()), Vec::new(), ui);
    server.run().expect("session runs to completion");

    assert_eq!(server.ui().input(), "");
    assert_eq!(server.ui().output(), "");
    assert!(parse_frames(&server.into_writer()).is_empty());
}
