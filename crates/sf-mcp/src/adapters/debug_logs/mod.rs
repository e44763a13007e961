//! Debug log management for one user.
//!
//! Every operation first resolves the user (by username or by name), then
//! acts on the user's trace flags or Apex logs through the Tooling API.
//! Arguments are validated before anything is sent to Salesforce.

mod disable;
mod enable;
mod retrieve;
mod users;

use std::str::FromStr;

use busbar_sf_client::security::url as url_security;
use busbar_sf_tooling::LogLevel;
use chrono::Utc;
use tracing::{info, instrument};

use crate::error::{ToolError, ToolResult};

pub use users::{looks_like_username, UserRecord};

pub const DEFAULT_EXPIRATION_MINUTES: u32 = 30;
pub const MAX_EXPIRATION_MINUTES: u32 = 1440;
pub const DEFAULT_LOG_LIMIT: u32 = 10;
pub const MAX_LOG_LIMIT: u32 = 100;

const CONTEXT: &str = "Error managing debug logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLogOperation {
    Enable,
    Disable,
    Retrieve,
}

impl FromStr for DebugLogOperation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            "retrieve" => Ok(Self::Retrieve),
            _ => Err(ToolError::validation(format!(
                "Invalid operation: '{s}'. Must be one of: enable, disable, retrieve"
            ))),
        }
    }
}

/// Arguments of the debug log tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugLogRequest {
    pub operation: String,
    /// Username or full name.
    pub username: String,
    pub log_level: Option<String>,
    pub expiration_minutes: Option<i64>,
    pub limit: Option<i64>,
    pub log_id: Option<String>,
    pub include_body: bool,
}

impl DebugLogRequest {
    pub fn new(operation: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_expiration_minutes(mut self, minutes: i64) -> Self {
        self.expiration_minutes = Some(minutes);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_log_id(mut self, log_id: impl Into<String>) -> Self {
        self.log_id = Some(log_id.into());
        self
    }

    pub fn with_body(mut self, include_body: bool) -> Self {
        self.include_body = include_body;
        self
    }

    /// Check the arguments without touching the network.
    fn plan(&self) -> Result<Plan, ToolError> {
        if self.username.trim().is_empty() {
            return Err(ToolError::validation("Username is required"));
        }

        match self.operation.parse::<DebugLogOperation>()? {
            DebugLogOperation::Enable => {
                let Some(level) = self.log_level.as_deref().filter(|l| !l.trim().is_empty()) else {
                    return Err(ToolError::validation(format!(
                        "Log level is required for 'enable' operation. Valid options: {}",
                        LogLevel::valid_options()
                    )));
                };
                let level = level
                    .parse::<LogLevel>()
                    .map_err(|err| ToolError::validation(err.to_string()))?;
                let minutes = self
                    .expiration_minutes
                    .map_or(DEFAULT_EXPIRATION_MINUTES, |m| {
                        m.clamp(1, MAX_EXPIRATION_MINUTES as i64) as u32
                    });
                Ok(Plan::Enable { level, minutes })
            }
            DebugLogOperation::Disable => Ok(Plan::Disable),
            DebugLogOperation::Retrieve => {
                let log_id = self
                    .log_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty());
                if let Some(id) = log_id {
                    if !url_security::is_valid_salesforce_id(id) {
                        return Err(ToolError::validation(format!(
                            "Invalid log ID '{id}'. Expected a 15 or 18 character Salesforce ID."
                        )));
                    }
                }
                let limit = self
                    .limit
                    .map_or(DEFAULT_LOG_LIMIT, |l| l.clamp(1, MAX_LOG_LIMIT as i64) as u32);
                Ok(Plan::Retrieve {
                    log_id: log_id.map(str::to_string),
                    limit,
                    include_body: self.include_body,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Plan {
    Enable { level: LogLevel, minutes: u32 },
    Disable,
    Retrieve {
        log_id: Option<String>,
        limit: u32,
        include_body: bool,
    },
}

impl crate::adapters::SalesforceTools {
    #[instrument(skip(self, request), fields(operation = %request.operation))]
    pub async fn manage_debug_logs(&self, request: &DebugLogRequest) -> ToolResult {
        let plan = request.plan()?;
        let input = request.username.trim();

        let rest = self.rest(CONTEXT).await?;
        let tooling = self.tooling(CONTEXT).await?;

        let user = users::resolve_user(&rest, input).await?;
        let warning = (!user.is_active).then(|| {
            format!(
                "Warning: User '{input}' exists but is inactive. \
                 Debug logs may not be generated for inactive users.\n\n"
            )
        });
        info!(user_id = %user.id, username = %user.username, "Resolved debug log user");

        let now = Utc::now();
        let text = match plan {
            Plan::Enable { level, minutes } => {
                enable::enable(&tooling, &user, input, level, minutes, now).await?
            }
            Plan::Disable => disable::disable(&tooling, &user, input, now).await?,
            Plan::Retrieve {
                log_id: Some(id),
                include_body,
                ..
            } => retrieve::retrieve_one(&tooling, &id, include_body).await?,
            Plan::Retrieve {
                log_id: None,
                limit,
                ..
            } => retrieve::retrieve_recent(&tooling, &user, input, limit).await?,
        };

        Ok(match warning {
            Some(warning) => format!("{warning}{text}"),
            None => text,
        })
    }
}
