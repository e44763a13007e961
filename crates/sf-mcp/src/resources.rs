//! URI-addressed read endpoints.
//!
//! `salesforce://schema/{object_name}` and
//! `salesforce://picklist/{object_name}/{field_name}` are served by the same
//! adapters as the describe and picklist tools.

use serde_json::{json, Value};
use url::Url;

use crate::tools::ToolCall;

pub const SCHEME: &str = "salesforce";
pub const SCHEMA_TEMPLATE: &str = "salesforce://schema/{object_name}";
pub const PICKLIST_TEMPLATE: &str = "salesforce://picklist/{object_name}/{field_name}";
pub const MIME_TYPE: &str = "text/markdown";

/// The `resources/templates/list` result.
pub fn list_templates() -> Value {
    json!({
        "resourceTemplates": [
            {
                "uriTemplate": SCHEMA_TEMPLATE,
                "name": "Object schema",
                "description": "Fields, relationships and picklists of an object.",
                "mimeType": MIME_TYPE
            },
            {
                "uriTemplate": PICKLIST_TEMPLATE,
                "name": "Picklist values",
                "description": "Values of one picklist field.",
                "mimeType": MIME_TYPE
            }
        ]
    })
}

/// Map a resource URI onto the tool call that renders it.
pub fn resolve(uri: &str) -> Option<ToolCall> {
    let parsed = Url::parse(uri).ok()?;
    if parsed.scheme() != SCHEME {
        return None;
    }

    let segments: Vec<String> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).map(|d| d.into_owned()))
        .collect::<Result<_, _>>()
        .ok()?;

    match (parsed.host_str()?, segments.as_slice()) {
        ("schema", [object_name]) => Some(ToolCall::DescribeObject {
            object_name: object_name.clone(),
        }),
        ("picklist", [object_name, field_name]) => Some(ToolCall::PicklistValues {
            object_name: object_name.clone(),
            field_name: field_name.clone(),
        }),
        _ => None,
    }
}
