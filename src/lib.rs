//! # busbar-sf-mcp
//!
//! A Model Context Protocol server for Salesforce, plus the client crates it
//! is built from.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, passwords) is redacted in Debug output
//! - Tracing skips credential parameters
//! - Values interpolated into SOQL are escaped
//!
//! ## Crates
//!
//! - **busbar-sf-client** - HTTP client, API versioning, SOQL and URL safety helpers
//! - **busbar-sf-auth** - OAuth 2.0 client-credentials and password flows, cached session
//! - **busbar-sf-rest** - REST API: describe, query, query builder
//! - **busbar-sf-tooling** - Tooling API: trace flags, debug levels, Apex logs, validation rules
//! - **busbar-sf-mcp-server** - the stdio MCP server and its ten tools
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_sf_mcp::{SalesforceTools, ServerConfig};
//! use busbar_sf_mcp::server::tools::ToolCall;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tools = SalesforceTools::from_config(&ServerConfig::from_env())?;
//!
//!     let text = tools
//!         .run(&ToolCall::DescribeObject {
//!             object_name: "Account".to_string(),
//!         })
//!         .await?;
//!     println!("{text}");
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "auth")]
pub use busbar_sf_auth as auth;
#[cfg(feature = "client")]
pub use busbar_sf_client as client;
#[cfg(feature = "rest")]
pub use busbar_sf_rest as rest;
#[cfg(feature = "server")]
pub use busbar_sf_mcp_server as server;
#[cfg(feature = "tooling")]
pub use busbar_sf_tooling as tooling;

#[cfg(feature = "auth")]
pub use busbar_sf_auth::{AuthConfig, Credentials, SessionProvider};
#[cfg(feature = "client")]
pub use busbar_sf_client::{ClientConfig, SalesforceClient};
#[cfg(feature = "server")]
pub use busbar_sf_mcp_server::{SalesforceTools, ServerConfig};
#[cfg(feature = "rest")]
pub use busbar_sf_rest::SalesforceRestClient;
#[cfg(feature = "tooling")]
pub use busbar_sf_tooling::ToolingClient;
