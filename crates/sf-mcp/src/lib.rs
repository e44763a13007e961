//! # sf-mcp-server
//!
//! A Model Context Protocol server that lets an AI assistant inspect and
//! query one Salesforce org over stdio.
//!
//! ## Tools
//!
//! - **Schema** - search the object catalog, describe objects, relationships,
//!   fields by type and picklist values
//! - **Records** - run a bounded SOQL query and render it as a table
//! - **Validation Rules** - list the rules defined on an object
//! - **Debug Logs** - enable, disable and retrieve Apex debug logs for a user
//! - **Connection** - report who the server is connected as
//!
//! Every tool returns Markdown text. Failures are returned as text too, with
//! the MCP `isError` flag set, so a misconfigured org never takes the
//! server down.
//!
//! ## Architecture
//!
//! ```text
//! stdin ──▶ stdio ──▶ handlers ──▶ tools ──▶ adapters ──▶ sf-rest / sf-tooling
//!                        │                       │
//!                        ├── resources           └── Connection (cached session)
//!                        └── prompts
//! ```

pub mod adapters;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod stdio;
pub mod tools;

pub use adapters::SalesforceTools;
pub use config::ServerConfig;
pub use connection::Connection;
pub use error::{ToolError, ToolResult};
pub use handlers::{handle_request, ToolProvider};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "salesforce-mcp-server";

/// Protocol revision answered when the client does not name one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
