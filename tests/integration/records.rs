use super::common::{call_tool, org, query_page, REST, TOOLING};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::Mock;

#[tokio::test]
async fn test_query_caps_limit_and_keeps_clauses() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .and(path(format!("{REST}/query")))
        .and(query_param(
            "q",
            "SELECT Id, Name FROM Account WHERE Industry = 'Banking' ORDER BY Name ASC LIMIT 100",
        ))
        .respond_with(query_page(json!([
            {"attributes": {"type": "Account"}, "Id": "001000000000001AAA", "Name": "First Bank"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "query_salesforce_records",
        json!({
            "object_name": "Account",
            "fields": ["Id", "Name"],
            "where_clause": "Industry = 'Banking'",
            "order_by": "Name ASC",
            "limit": 5000
        }),
    )
    .await;

    assert!(!is_error, "{text}");
    assert!(text.contains("Found 1 records. Displaying 1."));
    assert!(text.contains("| 001000000000001AAA | First Bank |"));
}

#[tokio::test]
async fn test_query_without_fields_is_rejected_locally() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .and(path(format!("{REST}/query")))
        .respond_with(query_page(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "query_salesforce_records",
        json!({ "object_name": "Account", "fields": [] }),
    )
    .await;

    assert!(is_error);
    assert_eq!(text, "Error: At least one field must be specified");
}

#[tokio::test]
async fn test_validation_rules_table() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .and(path(format!("{TOOLING}/query")))
        .and(query_param(
            "q",
            "SELECT Id, ValidationName, Active, Description, EntityDefinition.DeveloperName, \
             ErrorDisplayField, ErrorMessage FROM ValidationRule \
             WHERE EntityDefinition.DeveloperName = 'Opportunity' ORDER BY ValidationName ASC",
        ))
        .respond_with(query_page(json!([
            {"Id": "03d000000000001AAA", "ValidationName": "Close_Date_Required", "Active": true,
             "ErrorMessage": "Close date is required", "ErrorDisplayField": "CloseDate",
             "Description": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "get_salesforce_validation_rules",
        json!({ "object_name": "Opportunity" }),
    )
    .await;

    assert!(!is_error);
    assert!(text.starts_with("Found 1 validation rules for Opportunity:\n\n"));
    assert!(text.contains(
        "| Close_Date_Required | Yes | Close date is required | CloseDate | N/A |"
    ));
}
