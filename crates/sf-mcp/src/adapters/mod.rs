//! Salesforce operations behind the MCP tools.
//!
//! Each adapter fetches what it needs through [`Connection`], renders the
//! result as Markdown and maps every failure into a [`ToolError`] carrying
//! the tool's error context.

mod connection;
pub mod debug_logs;
mod discovery;
mod records;
mod schema;
mod validation;

use busbar_sf_rest::SalesforceRestClient;
use busbar_sf_tooling::ToolingClient;

use crate::config::ServerConfig;
use crate::connection::Connection;
use crate::error::ToolError;

pub use debug_logs::{DebugLogOperation, DebugLogRequest};
pub use records::{clamp_query_limit, QueryRequest, DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};

/// The server's tool implementations, bound to one org.
#[derive(Debug, Clone)]
pub struct SalesforceTools {
    connection: Connection,
}

impl SalesforceTools {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn from_config(config: &ServerConfig) -> busbar_sf_client::Result<Self> {
        Ok(Self::new(Connection::from_config(config)?))
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    async fn rest(&self, context: &str) -> Result<SalesforceRestClient, ToolError> {
        self.connection
            .rest()
            .await
            .map_err(|err| ToolError::auth(context, err))
    }

    async fn tooling(&self, context: &str) -> Result<ToolingClient, ToolError> {
        self.connection
            .tooling()
            .await
            .map_err(|err| ToolError::auth(context, err))
    }
}

/// A blank required argument.
fn require(value: &str, message: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        Err(ToolError::validation(message))
    } else {
        Ok(())
    }
}
