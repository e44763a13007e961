//! # sf-tooling
//!
//! Salesforce Tooling API client for debug logging and declarative metadata.
//!
//! ## Features
//!
//! - **Tooling Query** - SOQL against Tooling API objects
//! - **Debug Logs** - list Apex logs and download a log body
//! - **Trace Flags** - find, create, extend and remove trace flags
//! - **Debug Levels** - look up or create a level by verbosity
//! - **Validation Rules** - list the rules defined on an object
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_tooling::{LogLevel, ToolingClient};
//!
//! let client = ToolingClient::new("https://myorg.my.salesforce.com", token)?;
//!
//! let level = match client.find_debug_level(LogLevel::Debug).await? {
//!     Some(id) => id,
//!     None => client.create_debug_level(&DebugLevel::uniform(LogLevel::Debug)).await?,
//! };
//!
//! let logs = client.get_user_apex_logs(user_id, 10).await?;
//! ```

mod client;
mod error;
mod types;

pub use client::ToolingClient;
pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use busbar_sf_client::QueryResult;
