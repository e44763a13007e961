//! Tool catalog and argument parsing.
//!
//! `tools/call` arguments are decoded into a [`ToolCall`] before anything
//! runs. Missing or mistyped arguments are protocol errors; values that are
//! present but unusable (a blank object name, an unknown log level) are left
//! to the adapters, which report them as tool errors.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::adapters::{DebugLogRequest, QueryRequest, SalesforceTools};
use crate::error::ToolResult;

pub const SEARCH_OBJECTS: &str = "search_salesforce_objects";
pub const DESCRIBE_OBJECT: &str = "describe_salesforce_object";
pub const DESCRIBE_OBJECT_RAW: &str = "describe_salesforce_object_raw_json";
pub const PICKLIST_VALUES: &str = "get_salesforce_picklist_values";
pub const RELATIONSHIP_FIELDS: &str = "describe_salesforce_relationship_fields";
pub const FIELDS_BY_TYPE: &str = "get_salesforce_fields_by_type";
pub const QUERY_RECORDS: &str = "query_salesforce_records";
pub const VALIDATION_RULES: &str = "get_salesforce_validation_rules";
pub const MANAGE_DEBUG_LOGS: &str = "manage_salesforce_debug_logs";
pub const CHECK_CONNECTION: &str = "check_salesforce_connection";

/// Upper bound on rows a single `query_salesforce_records` call returns.
pub const TOOL_QUERY_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument '{field}' for {tool}")]
    Missing { tool: &'static str, field: &'static str },

    #[error("Argument '{field}' for {tool} must be {expected}")]
    WrongType {
        tool: &'static str,
        field: &'static str,
        expected: &'static str,
    },
}

/// A decoded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    SearchObjects { pattern: String },
    DescribeObject { object_name: String },
    DescribeObjectRaw { object_name: String },
    PicklistValues { object_name: String, field_name: String },
    RelationshipFields { object_name: String },
    FieldsByType { object_name: String, field_type: Option<String> },
    QueryRecords(QueryRequest),
    ValidationRules { object_name: String },
    ManageDebugLogs(DebugLogRequest),
    CheckConnection,
}

struct Args<'a> {
    tool: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    fn wrong(&self, field: &'static str, expected: &'static str) -> ArgumentError {
        ArgumentError::WrongType {
            tool: self.tool,
            field,
            expected,
        }
    }

    /// Null counts as absent.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    fn opt_str(&self, field: &'static str) -> Result<Option<String>, ArgumentError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.wrong(field, "a string")),
        }
    }

    fn str(&self, field: &'static str) -> Result<String, ArgumentError> {
        self.opt_str(field)?.ok_or(ArgumentError::Missing {
            tool: self.tool,
            field,
        })
    }

    /// Integers, integral floats and numeric strings are all accepted.
    fn opt_int(&self, field: &'static str) -> Result<Option<i64>, ArgumentError> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or_else(|| self.wrong(field, "an integer"))
    }

    fn opt_bool(&self, field: &'static str) -> Result<Option<bool>, ArgumentError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(_) => Err(self.wrong(field, "a boolean")),
        }
    }

    /// An array of strings, or one comma-separated string.
    fn str_list(&self, field: &'static str) -> Result<Vec<String>, ArgumentError> {
        match self.get(field) {
            None => Err(ArgumentError::Missing {
                tool: self.tool,
                field,
            }),
            Some(Value::String(s)) => Ok(s.split(',').map(|f| f.trim().to_string()).collect()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| self.wrong(field, "an array of strings"))
                })
                .collect(),
            Some(_) => Err(self.wrong(field, "an array of strings")),
        }
    }
}

impl ToolCall {
    pub fn parse(name: &str, arguments: &Map<String, Value>) -> Result<Self, ArgumentError> {
        let tool = canonical_name(name).ok_or_else(|| ArgumentError::UnknownTool(name.to_string()))?;
        let args = Args { tool, map: arguments };

        let call = match tool {
            SEARCH_OBJECTS => {
                // The environment comes from configuration; the flag is accepted for compatibility.
                args.opt_bool("sandbox")?;
                ToolCall::SearchObjects {
                    pattern: args.str("pattern")?,
                }
            }
            DESCRIBE_OBJECT => ToolCall::DescribeObject {
                object_name: args.str("object_name")?,
            },
            DESCRIBE_OBJECT_RAW => ToolCall::DescribeObjectRaw {
                object_name: args.str("object_name")?,
            },
            PICKLIST_VALUES => ToolCall::PicklistValues {
                object_name: args.str("object_name")?,
                field_name: args.str("field_name")?,
            },
            RELATIONSHIP_FIELDS => ToolCall::RelationshipFields {
                object_name: args.str("object_name")?,
            },
            FIELDS_BY_TYPE => ToolCall::FieldsByType {
                object_name: args.str("object_name")?,
                field_type: args.opt_str("field_type")?,
            },
            QUERY_RECORDS => ToolCall::QueryRecords(QueryRequest {
                object_name: args.str("object_name")?,
                fields: args.str_list("fields")?,
                where_clause: args.opt_str("where_clause")?,
                order_by: args.opt_str("order_by")?,
                limit: args
                    .opt_int("limit")?
                    .map(|limit| limit.clamp(1, TOOL_QUERY_LIMIT)),
            }),
            VALIDATION_RULES => ToolCall::ValidationRules {
                object_name: args.str("object_name")?,
            },
            MANAGE_DEBUG_LOGS => {
                let expiration = match args.opt_int("expiration_time")? {
                    Some(minutes) => Some(minutes),
                    None => args.opt_int("expiration_minutes")?,
                };
                ToolCall::ManageDebugLogs(DebugLogRequest {
                    operation: args.str("operation")?,
                    username: args.str("username")?,
                    log_level: args.opt_str("log_level")?,
                    expiration_minutes: expiration,
                    limit: args.opt_int("limit")?,
                    log_id: args.opt_str("log_id")?,
                    include_body: args.opt_bool("include_body")?.unwrap_or(false),
                })
            }
            _ => ToolCall::CheckConnection,
        };
        Ok(call)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::SearchObjects { .. } => SEARCH_OBJECTS,
            ToolCall::DescribeObject { .. } => DESCRIBE_OBJECT,
            ToolCall::DescribeObjectRaw { .. } => DESCRIBE_OBJECT_RAW,
            ToolCall::PicklistValues { .. } => PICKLIST_VALUES,
            ToolCall::RelationshipFields { .. } => RELATIONSHIP_FIELDS,
            ToolCall::FieldsByType { .. } => FIELDS_BY_TYPE,
            ToolCall::QueryRecords(_) => QUERY_RECORDS,
            ToolCall::ValidationRules { .. } => VALIDATION_RULES,
            ToolCall::ManageDebugLogs(_) => MANAGE_DEBUG_LOGS,
            ToolCall::CheckConnection => CHECK_CONNECTION,
        }
    }
}

const ALL_TOOLS: [&str; 10] = [
    SEARCH_OBJECTS,
    DESCRIBE_OBJECT,
    DESCRIBE_OBJECT_RAW,
    PICKLIST_VALUES,
    RELATIONSHIP_FIELDS,
    FIELDS_BY_TYPE,
    QUERY_RECORDS,
    VALIDATION_RULES,
    MANAGE_DEBUG_LOGS,
    CHECK_CONNECTION,
];

fn canonical_name(name: &str) -> Option<&'static str> {
    ALL_TOOLS.into_iter().find(|tool| *tool == name)
}

impl SalesforceTools {
    /// Run a decoded tool call against the org.
    pub async fn run(&self, call: &ToolCall) -> ToolResult {
        match call {
            ToolCall::SearchObjects { pattern } => self.search_objects(pattern).await,
            ToolCall::DescribeObject { object_name } => self.describe_object(object_name).await,
            ToolCall::DescribeObjectRaw { object_name } => {
                self.describe_object_raw(object_name).await
            }
            ToolCall::PicklistValues {
                object_name,
                field_name,
            } => self.picklist_values(object_name, field_name).await,
            ToolCall::RelationshipFields { object_name } => {
                self.relationship_fields(object_name).await
            }
            ToolCall::FieldsByType {
                object_name,
                field_type,
            } => self.fields_by_type(object_name, field_type.as_deref()).await,
            ToolCall::QueryRecords(request) => self.query_records(request).await,
            ToolCall::ValidationRules { object_name } => self.validation_rules(object_name).await,
            ToolCall::ManageDebugLogs(request) => self.manage_debug_logs(request).await,
            ToolCall::CheckConnection => self.check_connection().await,
        }
    }
}

fn object_name_schema() -> Value {
    json!({
        "type": "string",
        "description": "API name of the object, e.g. Account or Invoice__c."
    })
}

/// The `tools/list` result.
pub fn list_tools() -> Value {
    json!({
        "tools": [
            {
                "name": SEARCH_OBJECTS,
                "description": "Find standard and custom objects whose API name or label contains any of the given words.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "pattern": {
                            "type": "string",
                            "description": "One or more words to look for, e.g. \"account\" or \"order line\"."
                        },
                        "sandbox": {
                            "type": "boolean",
                            "description": "Accepted for compatibility. The org is chosen by server configuration."
                        }
                    },
                    "required": ["pattern"]
                }
            },
            {
                "name": DESCRIBE_OBJECT,
                "description": "Describe an object: properties, fields, relationship fields, picklists, child relationships and record types.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "object_name": object_name_schema() },
                    "required": ["object_name"]
                }
            },
            {
                "name": DESCRIBE_OBJECT_RAW,
                "description": "Return the object's describe document exactly as the API returns it, as pretty-printed JSON.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "object_name": object_name_schema() },
                    "required": ["object_name"]
                }
            },
            {
                "name": PICKLIST_VALUES,
                "description": "List the values of a picklist field with their labels, default flag and active flag.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "object_name": object_name_schema(),
                        "field_name": {
                            "type": "string",
                            "description": "API name of the picklist field, e.g. Industry."
                        }
                    },
                    "required": ["object_name", "field_name"]
                }
            },
            {
                "name": RELATIONSHIP_FIELDS,
                "description": "Show an object's lookup and master-detail fields and the objects that point at it.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "object_name": object_name_schema() },
                    "required": ["object_name"]
                }
            },
            {
                "name": FIELDS_BY_TYPE,
                "description": "List an object's fields of one data type, or every field when no type is given.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "object_name": object_name_schema(),
                        "field_type": {
                            "type": "string",
                            "description": "Field type such as string, picklist, reference, date, currency or boolean."
                        }
                    },
                    "required": ["object_name"]
                }
            },
            {
                "name": QUERY_RECORDS,
                "description": "Run a SOQL query built from the given object, fields, filter and sort, and show the rows as a table.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "object_name": object_name_schema(),
                        "fields": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Fields to select. Relationship paths such as Owner.Name are allowed."
                        },
                        "where_clause": {
                            "type": "string",
                            "description": "SOQL condition without the WHERE keyword, e.g. Industry = 'Banking'."
                        },
                        "order_by": {
                            "type": "string",
                            "description": "SOQL sort without the ORDER BY keywords, e.g. CreatedDate DESC."
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum rows to return.",
                            "minimum": 1,
                            "maximum": TOOL_QUERY_LIMIT,
                            "default": 10
                        }
                    },
                    "required": ["object_name", "fields"]
                }
            },
            {
                "name": VALIDATION_RULES,
                "description": "List an object's validation rules with their status, error message and error field.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "object_name": object_name_schema() },
                    "required": ["object_name"]
                }
            },
            {
                "name": MANAGE_DEBUG_LOGS,
                "description": "Enable, disable or retrieve Apex debug logs for a user identified by username or full name.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "operation": {
                            "type": "string",
                            "enum": ["enable", "disable", "retrieve"]
                        },
                        "username": {
                            "type": "string",
                            "description": "Username (user@example.com) or full name of the user."
                        },
                        "log_level": {
                            "type": "string",
                            "enum": ["NONE", "ERROR", "WARN", "INFO", "DEBUG", "FINE", "FINER", "FINEST"],
                            "description": "Required for enable."
                        },
                        "expiration_time": {
                            "type": "integer",
                            "description": "Minutes until a new trace flag expires.",
                            "minimum": 1,
                            "maximum": 1440,
                            "default": 30
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Number of logs to list for retrieve.",
                            "minimum": 1,
                            "maximum": 100,
                            "default": 10
                        },
                        "log_id": {
                            "type": "string",
                            "description": "Retrieve this log instead of listing recent ones."
                        },
                        "include_body": {
                            "type": "boolean",
                            "description": "Include the log content when retrieving one log.",
                            "default": false
                        }
                    },
                    "required": ["operation", "username"]
                }
            },
            {
                "name": CHECK_CONNECTION,
                "description": "Check the connection to the org and report the username, instance URL and environment.",
                "inputSchema": { "type": "object", "properties": {} }
            }
        ]
    })
}
