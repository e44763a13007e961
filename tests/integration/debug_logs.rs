use super::common::{call_tool, org, query_page, REST, TOOLING};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, path_regex, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "005000000000042AAA";

async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{REST}/query")))
        .and(query_param(
            "q",
            "SELECT Id, Username, Name, IsActive FROM User WHERE Username = 'grace@acme.com'",
        ))
        .respond_with(query_page(json!([{
            "Id": USER_ID,
            "Username": "grace@acme.com",
            "Name": "Grace Hopper",
            "IsActive": true
        }])))
        .mount(server)
        .await;
}

async fn mount_active_flags(server: &MockServer, flags: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("{TOOLING}/query")))
        .and(query_param_contains("q", "FROM TraceFlag"))
        .and(query_param_contains("q", USER_ID))
        .respond_with(query_page(flags))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_enable_extends_existing_flag() {
    let (server, tools) = org().await;
    mount_user(&server).await;
    mount_active_flags(
        &server,
        json!([{
            "Id": "7tf000000000042AAA",
            "DebugLevelId": "7dl000000000001AAA",
            "ExpirationDate": "2099-01-01T00:00:00.000+0000"
        }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{TOOLING}/query")))
        .and(query_param_contains("q", "FROM DebugLevel WHERE ApexCode = 'DEBUG'"))
        .respond_with(query_page(json!([{"Id": "7dl000000000002AAA"}])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{TOOLING}/sobjects/TraceFlag/7tf000000000042AAA")))
        .and(body_partial_json(json!({
            "ExpirationDate": "2099-01-01T00:00:30.000Z",
            "DebugLevelId": "7dl000000000002AAA"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "manage_salesforce_debug_logs",
        json!({ "operation": "enable", "username": "grace@acme.com", "log_level": "debug" }),
    )
    .await;

    assert!(!is_error, "{text}");
    assert!(text.starts_with("Successfully updated debug log expiration for user 'grace@acme.com'."));
    assert!(text.contains("**New Expiration:** 2099-01-01 00:00:30 UTC\n"));
}

#[tokio::test]
async fn test_disable_removes_every_flag() {
    let (server, tools) = org().await;
    mount_user(&server).await;
    mount_active_flags(
        &server,
        json!([
            {"Id": "7tf000000000042AAA", "ExpirationDate": "2099-01-01T00:00:00.000+0000"},
            {"Id": "7tf000000000043AAA", "ExpirationDate": "2099-01-01T00:00:00.000+0000"}
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/services/data/v63\.0/tooling/sobjects/TraceFlag/7tf\w+$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "manage_salesforce_debug_logs",
        json!({ "operation": "DISABLE", "username": "grace@acme.com" }),
    )
    .await;

    assert!(!is_error);
    assert_eq!(
        text,
        "Successfully disabled 2 debug log configuration(s) for user 'grace@acme.com' by removing them."
    );
}

#[tokio::test]
async fn test_retrieve_body_for_single_log() {
    let (server, tools) = org().await;
    mount_user(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{TOOLING}/query")))
        .and(query_param_contains("q", "WHERE Id = '07L000000000042AAA'"))
        .respond_with(query_page(json!([{
            "Id": "07L000000000042AAA",
            "LogUserId": USER_ID,
            "Operation": "/services/data/v63.0/sobjects/Account",
            "Application": "Unknown",
            "Status": "Success",
            "LogLength": 17,
            "LastModifiedDate": "2026-10-17T12:00:00.000+0000",
            "Request": "Api"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{TOOLING}/sobjects/ApexLog/07L000000000042AAA/Body")))
        .respond_with(ResponseTemplate::new(200).set_body_string("EXECUTION_STARTED"))
        .expect(1)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "manage_salesforce_debug_logs",
        json!({
            "operation": "retrieve",
            "username": "grace@acme.com",
            "log_id": "07L000000000042AAA",
            "include_body": "true"
        }),
    )
    .await;

    assert!(!is_error, "{text}");
    assert!(text.contains("- **Size:** 17 bytes\n"));
    assert!(text.ends_with("**Log Body:**\n```\nEXECUTION_STARTED\n```\n"));
}

#[tokio::test]
async fn test_unknown_operation_makes_no_calls() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .respond_with(query_page(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "manage_salesforce_debug_logs",
        json!({ "operation": "purge", "username": "grace@acme.com" }),
    )
    .await;

    assert!(is_error);
    assert_eq!(
        text,
        "Error: Invalid operation: 'purge'. Must be one of: enable, disable, retrieve"
    );
}
