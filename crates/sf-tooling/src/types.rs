//! Tooling API record types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

// ============================================================================
// Date Handling
// ============================================================================

/// Format a timestamp the way SOQL datetime literals and Tooling API
/// payloads expect: UTC, millisecond precision, `Z` suffix.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parse a datetime as Salesforce returns it (`2026-10-17T09:30:00.000+0000`).
///
/// RFC 3339 and offset-less timestamps are accepted too. Offset-less values
/// are taken as UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

// ============================================================================
// Debug Log Types
// ============================================================================

/// ApexLog record from Tooling API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApexLog {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "LogUserId", default)]
    pub log_user_id: Option<String>,

    #[serde(rename = "LogLength", default)]
    pub log_length: Option<i64>,

    #[serde(rename = "LastModifiedDate", default)]
    pub last_modified_date: Option<String>,

    #[serde(rename = "Status", default)]
    pub status: Option<String>,

    #[serde(rename = "Operation", default)]
    pub operation: Option<String>,

    #[serde(rename = "Request", default)]
    pub request: Option<String>,

    #[serde(rename = "Application", default)]
    pub application: Option<String>,
}

// ============================================================================
// Trace Flag Types
// ============================================================================

/// TraceFlag record from Tooling API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraceFlag {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "TracedEntityId", default)]
    pub traced_entity_id: Option<String>,

    #[serde(rename = "LogType", default)]
    pub log_type: Option<String>,

    #[serde(rename = "DebugLevelId", default)]
    pub debug_level_id: Option<String>,

    #[serde(rename = "StartDate", default)]
    pub start_date: Option<String>,

    #[serde(rename = "ExpirationDate", default)]
    pub expiration_date: Option<String>,
}

impl TraceFlag {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_date.as_deref().and_then(parse_datetime)
    }
}

/// Body of a TraceFlag create call.
#[derive(Debug, Clone, Serialize)]
pub struct NewTraceFlag {
    #[serde(rename = "TracedEntityId")]
    pub traced_entity_id: String,

    #[serde(rename = "DebugLevelId")]
    pub debug_level_id: String,

    #[serde(rename = "LogType")]
    pub log_type: String,

    #[serde(rename = "StartDate")]
    pub start_date: String,

    #[serde(rename = "ExpirationDate")]
    pub expiration_date: String,
}

impl NewTraceFlag {
    /// A `USER_DEBUG` flag on `user_id` covering `[start, expiration)`.
    pub fn user_debug(
        user_id: impl Into<String>,
        debug_level_id: impl Into<String>,
        start: DateTime<Utc>,
        expiration: DateTime<Utc>,
    ) -> Self {
        Self {
            traced_entity_id: user_id.into(),
            debug_level_id: debug_level_id.into(),
            log_type: "USER_DEBUG".to_string(),
            start_date: format_datetime(start),
            expiration_date: format_datetime(expiration),
        }
    }
}

/// Partial TraceFlag update. `None` fields are left out of the PATCH body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TraceFlagUpdate {
    #[serde(rename = "ExpirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    #[serde(rename = "DebugLevelId", skip_serializing_if = "Option::is_none")]
    pub debug_level_id: Option<String>,
}

impl TraceFlagUpdate {
    pub fn expire_at(expiration: DateTime<Utc>) -> Self {
        Self {
            expiration_date: Some(format_datetime(expiration)),
            debug_level_id: None,
        }
    }

    pub fn with_debug_level(mut self, debug_level_id: impl Into<String>) -> Self {
        self.debug_level_id = Some(debug_level_id.into());
        self
    }
}

/// DebugLevel record from Tooling API.
///
/// Used both to decode query rows and as a create body; the `Id` is
/// omitted when serializing a new level.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DebugLevel {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "DeveloperName", default)]
    pub developer_name: String,

    #[serde(rename = "MasterLabel", default)]
    pub master_label: String,

    #[serde(rename = "ApexCode", default)]
    pub apex_code: Option<String>,

    #[serde(rename = "ApexProfiling", default)]
    pub apex_profiling: Option<String>,

    #[serde(rename = "Callout", default)]
    pub callout: Option<String>,

    #[serde(rename = "Database", default)]
    pub database: Option<String>,

    #[serde(rename = "System", default)]
    pub system: Option<String>,

    #[serde(rename = "Validation", default)]
    pub validation: Option<String>,

    #[serde(rename = "Visualforce", default)]
    pub visualforce: Option<String>,

    #[serde(rename = "Workflow", default)]
    pub workflow: Option<String>,
}

impl DebugLevel {
    /// A level named after `level` with every category set to it.
    pub fn uniform(level: LogLevel) -> Self {
        let name = level.to_string();
        let category = || Some(name.clone());
        Self {
            id: None,
            developer_name: name.clone(),
            master_label: name.clone(),
            apex_code: category(),
            apex_profiling: category(),
            callout: category(),
            database: category(),
            system: category(),
            validation: category(),
            visualforce: category(),
            workflow: category(),
        }
    }
}

/// Debug log level options, least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Fine,
    Finer,
    Finest,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Fine,
        LogLevel::Finer,
        LogLevel::Finest,
    ];

    /// `NONE, ERROR, WARN, INFO, DEBUG, FINE, FINER, FINEST`
    pub fn valid_options() -> String {
        Self::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::None => write!(f, "NONE"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Fine => write!(f, "FINE"),
            LogLevel::Finer => write!(f, "FINER"),
            LogLevel::Finest => write!(f, "FINEST"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::new(ErrorKind::InvalidLogLevel(wanted.to_string())))
    }
}

// ============================================================================
// Validation Rule Types
// ============================================================================

/// ValidationRule record from Tooling API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationRule {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "ValidationName", default)]
    pub validation_name: Option<String>,

    #[serde(rename = "Active", default)]
    pub active: bool,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    #[serde(rename = "ErrorDisplayField", default)]
    pub error_display_field: Option<String>,

    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<String>,

    #[serde(rename = "EntityDefinition", default)]
    pub entity_definition: Option<EntityDefinitionRef>,
}

/// EntityDefinition relationship on a ValidationRule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntityDefinitionRef {
    #[serde(rename = "DeveloperName", default)]
    pub developer_name: Option<String>,
}
