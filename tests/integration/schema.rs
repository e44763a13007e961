use super::common::{call_tool, org, rpc, REST};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn case_describe() -> serde_json::Value {
    json!({
        "name": "Case",
        "label": "Case",
        "labelPlural": "Cases",
        "keyPrefix": "500",
        "custom": false,
        "createable": true,
        "updateable": true,
        "deletable": true,
        "queryable": true,
        "fields": [
            {"name": "Id", "label": "Case ID", "type": "id", "nillable": false},
            {"name": "Priority", "label": "Priority", "type": "string", "nillable": true},
            {"name": "Status", "label": "Status", "type": "picklist", "nillable": true,
             "picklistValues": [
                {"value": "New", "label": "New", "active": true, "defaultValue": true},
                {"value": "Closed", "label": "Closed", "active": true, "defaultValue": false}
             ]},
            {"name": "AccountId", "label": "Account ID", "type": "reference", "nillable": true,
             "referenceTo": ["Account"], "relationshipName": "Account"}
        ],
        "childRelationships": [],
        "recordTypeInfos": []
    })
}

async fn mount_case(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{REST}/sobjects/Case/describe")))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_describe()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_objects_matches_any_term() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .and(path(format!("{REST}/sobjects")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "encoding": "UTF-8",
            "maxBatchSize": 200,
            "sobjects": [
                {"name": "Account", "label": "Account", "custom": false},
                {"name": "Invoice__c", "label": "Invoice", "custom": true},
                {"name": "Contact", "label": "Contact", "custom": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "search_salesforce_objects",
        json!({ "pattern": "invoice account" }),
    )
    .await;

    assert!(!is_error);
    assert!(text.starts_with("Found 2 Salesforce objects matching 'invoice account':\n\n"));
    assert!(text.contains("| Account | Account | No |"));
    assert!(text.contains("| Invoice__c | Invoice | Yes |"));
    assert!(!text.contains("| Contact |"));
}

#[tokio::test]
async fn test_picklist_values_on_non_picklist_field() {
    let (server, tools) = org().await;
    mount_case(&server).await;

    let (text, is_error) = call_tool(
        &tools,
        "get_salesforce_picklist_values",
        json!({ "object_name": "Case", "field_name": "Priority" }),
    )
    .await;

    assert!(is_error);
    assert_eq!(text, "Field 'Priority' is not a picklist field (type: string).");
}

#[tokio::test]
async fn test_picklist_resource_renders_values() {
    let (server, tools) = org().await;
    mount_case(&server).await;

    let response = rpc(
        &tools,
        "resources/read",
        Some(json!({ "uri": "salesforce://picklist/Case/Status" })),
    )
    .await;
    let text = response["result"]["contents"][0]["text"].as_str().unwrap();

    assert!(text.contains("| New | New |"));
    assert!(text.contains("| Closed | Closed |"));
}

#[tokio::test]
async fn test_describe_missing_object() {
    let (server, tools) = org().await;
    Mock::given(method("GET"))
        .and(path(format!("{REST}/sobjects/Nope__c/describe")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!([{
            "errorCode": "NOT_FOUND",
            "message": "The requested resource does not exist"
        }])))
        .mount(&server)
        .await;

    let (text, is_error) = call_tool(
        &tools,
        "describe_salesforce_object",
        json!({ "object_name": "Nope__c" }),
    )
    .await;

    assert!(is_error);
    assert_eq!(text, "Error describing object Nope__c: Object 'Nope__c' not found.");
}

#[tokio::test]
async fn test_relationship_fields() {
    let (server, tools) = org().await;
    mount_case(&server).await;

    let (text, is_error) = call_tool(
        &tools,
        "describe_salesforce_relationship_fields",
        json!({ "object_name": "Case" }),
    )
    .await;

    assert!(!is_error);
    assert!(text.starts_with("# Relationship Fields for Case (Case)\n\n"));
    assert!(text.contains("| AccountId | Account ID | Account | Account | Lookup |"));
    assert!(!text.contains("| Status |"));
    assert!(text.ends_with("No child relationships found.\n"));
}
