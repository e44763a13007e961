use busbar_sf_mcp::client::SfHttpClient;
use busbar_sf_mcp::server::protocol::Request;
use busbar_sf_mcp::server::{handle_request, Connection};
use busbar_sf_mcp::{AuthConfig, SalesforceTools, SessionProvider};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REST: &str = "/services/data/v63.0";
pub const TOOLING: &str = "/services/data/v63.0/tooling";

/// A mock org that issues tokens for itself, and the tools pointed at it.
pub async fn org() -> (MockServer, SalesforceTools) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "00Dxx!integration",
            "instance_url": server.uri(),
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    let tools = tools_for(&server);
    (server, tools)
}

/// Tools configured against `server` without any mocks mounted.
pub fn tools_for(server: &MockServer) -> SalesforceTools {
    let config = AuthConfig::new("cid", "secret").with_domain_url(server.uri());
    let http = SfHttpClient::default_client().expect("http client");
    SalesforceTools::new(Connection::new(SessionProvider::new(config), http))
}

pub fn query_page(rows: Value) -> ResponseTemplate {
    let total = rows.as_array().map_or(0, Vec::len);
    ResponseTemplate::new(200).set_body_json(json!({
        "totalSize": total,
        "done": true,
        "records": rows
    }))
}

/// Send one `tools/call` and return `(text, is_error)`.
pub async fn call_tool(tools: &SalesforceTools, name: &str, arguments: Value) -> (String, bool) {
    let response = rpc(
        tools,
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    )
    .await;
    let result = &response["result"];
    assert!(result.is_object(), "expected a tool result, got {response}");
    (
        result["content"][0]["text"].as_str().unwrap_or_default().to_string(),
        result["isError"].as_bool().unwrap_or_default(),
    )
}

pub async fn rpc(tools: &SalesforceTools, method: &str, params: Option<Value>) -> Value {
    let response = handle_request(Request::new(7, method, params), tools)
        .await
        .expect("request should be answered");
    serde_json::to_value(response).expect("serializable response")
}
