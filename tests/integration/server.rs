use super::common::{call_tool, org, rpc, tools_for, REST};
use busbar_sf_mcp::server::protocol::INVALID_PARAMS;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_check_connection_reports_catalog_size() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .and(path(format!("{REST}/sobjects")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sobjects": [
                {"name": "Account", "label": "Account", "custom": false},
                {"name": "Contact", "label": "Contact", "custom": false}
            ]
        })))
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(&tools, "check_salesforce_connection", json!({})).await;

    assert!(!is_error, "{text}");
    assert_eq!(
        text,
        format!(
            "Salesforce connection is active.\n\n\
             Connection Status: Successful (2 objects available)\n\
             Username: Unknown\n\
             Instance URL: {}\n\
             Environment: Production",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_rejected_token_is_an_in_band_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_client_id",
            "error_description": "client identifier invalid"
        })))
        .mount(&server)
        .await;
    let tools = tools_for(&server);

    let (text, is_error) = call_tool(
        &tools,
        "describe_salesforce_object",
        json!({ "object_name": "Account" }),
    )
    .await;

    assert!(is_error);
    assert!(text.starts_with("Error describing object Account: "), "{text}");
    assert!(text.contains("invalid_client_id"));
}

#[tokio::test]
async fn test_missing_required_argument_is_a_protocol_error() {
    let (_server, tools) = org().await;
    let response = rpc(
        &tools,
        "tools/call",
        Some(json!({ "name": "get_salesforce_picklist_values", "arguments": { "object_name": "Case" } })),
    )
    .await;

    assert_eq!(response["error"]["code"], INVALID_PARAMS);
    assert_eq!(
        response["error"]["message"],
        "Missing required argument 'field_name' for get_salesforce_picklist_values"
    );
}
