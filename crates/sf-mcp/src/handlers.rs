//! MCP method dispatch.

use std::future::Future;

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::adapters::SalesforceTools;
use crate::error::ToolResult;
use crate::protocol::{Request, Response, INVALID_PARAMS, METHOD_NOT_FOUND};
use crate::tools::{list_tools, ToolCall};
use crate::{prompts, resources, DEFAULT_PROTOCOL_VERSION, SERVER_NAME};

/// Executes decoded tool calls.
///
/// [`SalesforceTools`] talks to a real org; tests substitute a fake.
pub trait ToolProvider {
    fn call_tool(&self, call: ToolCall) -> impl Future<Output = ToolResult>;
}

impl ToolProvider for SalesforceTools {
    async fn call_tool(&self, call: ToolCall) -> ToolResult {
        self.run(&call).await
    }
}

/// Handle one request. Notifications yield `None`.
pub async fn handle_request(request: Request, provider: &impl ToolProvider) -> Option<Response> {
    if request.is_notification() {
        debug!(method = %request.method, "Notification");
        return None;
    }
    let id = request.id.unwrap_or(Value::Null);

    let response = match request.method.as_str() {
        "initialize" => initialize(id, request.params.as_ref()),
        "notifications/initialized" | "initialized" => return None,
        "ping" => Response::ok(id, json!({})),
        "tools/list" => Response::ok(id, list_tools()),
        "tools/call" => handle_tools_call(id, request.params, provider).await,
        "resources/list" => Response::ok(id, json!({ "resources": [] })),
        "resources/templates/list" => Response::ok(id, resources::list_templates()),
        "resources/read" => handle_resources_read(id, request.params, provider).await,
        "prompts/list" => Response::ok(id, prompts::list_prompts()),
        "prompts/get" => handle_prompts_get(id, request.params),
        other => {
            debug!(method = other, "Unknown method");
            Response::error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };
    Some(response)
}

fn initialize(id: Value, params: Option<&Value>) -> Response {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    info!(protocol_version, "Client initialized session");

    Response::ok(
        id,
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false },
                "prompts": { "listChanged": false }
            },
            "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
        }),
    )
}

fn params_object(id: &Value, params: Option<Value>) -> Result<Map<String, Value>, Response> {
    match params {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(Response::error(id.clone(), INVALID_PARAMS, "params must be an object")),
        None => Err(Response::error(id.clone(), INVALID_PARAMS, "Missing params")),
    }
}

async fn handle_tools_call(
    id: Value,
    params: Option<Value>,
    provider: &impl ToolProvider,
) -> Response {
    let params = match params_object(&id, params) {
        Ok(map) => map,
        Err(response) => return response,
    };
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return Response::error(id, INVALID_PARAMS, "Missing tool name");
    };

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => return Response::error(id, INVALID_PARAMS, "arguments must be an object"),
    };

    let call = match ToolCall::parse(name, &arguments) {
        Ok(call) => call,
        Err(err) => {
            warn!(tool = name, error = %err, "Rejected tool call");
            return Response::error(id, INVALID_PARAMS, err.to_string());
        }
    };

    info!(tool = call.name(), "Calling tool");
    tool_result(id, provider.call_tool(call).await)
}

fn tool_result(id: Value, result: ToolResult) -> Response {
    let (text, is_error) = match result {
        Ok(text) => (text, false),
        Err(err) => {
            warn!(error = %err, "Tool returned an error");
            (err.to_string(), true)
        }
    };
    Response::ok(
        id,
        json!({
            "content": [{ "type": "text", "text": text }],
            "isError": is_error
        }),
    )
}

async fn handle_resources_read(
    id: Value,
    params: Option<Value>,
    provider: &impl ToolProvider,
) -> Response {
    let params = match params_object(&id, params) {
        Ok(map) => map,
        Err(response) => return response,
    };
    let Some(uri) = params.get("uri").and_then(Value::as_str) else {
        return Response::error(id, INVALID_PARAMS, "Missing resource uri");
    };
    let Some(call) = resources::resolve(uri) else {
        return Response::error(id, INVALID_PARAMS, format!("Unknown resource: {uri}"));
    };

    info!(uri, tool = call.name(), "Reading resource");
    let text = match provider.call_tool(call).await {
        Ok(text) => text,
        Err(err) => err.to_string(),
    };
    Response::ok(
        id,
        json!({
            "contents": [{ "uri": uri, "mimeType": resources::MIME_TYPE, "text": text }]
        }),
    )
}

fn handle_prompts_get(id: Value, params: Option<Value>) -> Response {
    let params = match params_object(&id, params) {
        Ok(map) => map,
        Err(response) => return response,
    };
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return Response::error(id, INVALID_PARAMS, "Missing prompt name");
    };
    match prompts::get_prompt(name) {
        Some(prompt) => Response::ok(id, prompt),
        None => Response::error(id, INVALID_PARAMS, format!("Unknown prompt: {name}")),
    }
}
