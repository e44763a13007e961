use busbar_sf_mcp_server::protocol::{METHOD_NOT_FOUND, PARSE_ERROR};
use busbar_sf_mcp_server::stdio::{handle_bytes, handle_line, serve};
use busbar_sf_mcp_server::tools::ToolCall;
use busbar_sf_mcp_server::{ToolProvider, ToolResult};
use serde_json::{json, Value};

struct EchoTool;

impl ToolProvider for EchoTool {
    async fn call_tool(&self, call: ToolCall) -> ToolResult {
        Ok(format!("called {}", call.name()))
    }
}

fn parse(line: &str) -> Value {
    serde_json::from_str(line).expect("response is JSON")
}

#[tokio::test]
async fn test_handle_line_returns_parse_error() {
    let response = parse(&handle_line("{not json", &EchoTool).await.expect("response"));
    assert_eq!(response["error"]["code"], PARSE_ERROR);
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn test_blank_lines_and_notifications_are_silent() {
    assert!(handle_line("   ", &EchoTool).await.is_none());
    assert!(handle_line(
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        &EchoTool
    )
    .await
    .is_none());
}

#[tokio::test]
async fn test_handle_line_unknown_method() {
    let line = r#"{"jsonrpc":"2.0","id":"a","method":"sampling/createMessage"}"#;
    let response = parse(&handle_line(line, &EchoTool).await.expect("response"));
    assert_eq!(response["id"], "a");
    assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
}

#[tokio::test]
async fn test_serve_answers_each_request_in_order() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"check_salesforce_connection"}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#,
        "\n",
    );

    let mut output = Vec::new();
    serve(input.as_bytes(), &mut output, &EchoTool).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(parse)
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(
        lines[1]["result"]["content"][0]["text"],
        "called check_salesforce_connection"
    );
    assert_eq!(lines[2]["id"], 3);
    assert_eq!(lines[2]["result"], json!({}));
}

#[tokio::test]
async fn test_handle_bytes_rejects_invalid_utf8() {
    let response = parse(&handle_bytes(b"{\"id\":\xff}\n", &EchoTool).await.expect("response"));
    assert_eq!(response["error"]["code"], PARSE_ERROR);
    assert_eq!(response["id"], Value::Null);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Parse error: invalid UTF-8"));
}

#[tokio::test]
async fn test_serve_keeps_reading_after_invalid_utf8() {
    let mut input = br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#.to_vec();
    input.extend_from_slice(b"\n\xc3\x28 garbage\n");
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);

    let mut output = Vec::new();
    serve(input.as_slice(), &mut output, &EchoTool).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(parse)
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["error"]["code"], PARSE_ERROR);
    assert_eq!(lines[2]["id"], 2);
    assert_eq!(lines[2]["result"], json!({}));
}
