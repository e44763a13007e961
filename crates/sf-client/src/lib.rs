//! # sf-client
//!
//! Core HTTP client infrastructure for the Salesforce APIs used by the
//! MCP server.
//!
//! This crate provides:
//! - A pooled `reqwest` client with compression and timeouts
//! - Salesforce error-body parsing with token redaction
//! - Typed JSON helpers for the REST and Tooling endpoints
//! - SOQL and URL safety helpers in [`security`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              sf-rest, sf-tooling, sf-mcp adapters           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Instance URL + access token + API version                │
//! │  - Typed JSON methods (get_json, post_json, patch_json)     │
//! │  - REST and Tooling SOQL query helpers                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP, compression, error mapping                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are sent exactly once. A failed call is returned to the caller
//! as an [`Error`]; nothing is retried.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_client::SalesforceClient;
//!
//! let client = SalesforceClient::new("https://na1.salesforce.com", token)?;
//! let result: QueryResult<serde_json::Value> =
//!     client.query("SELECT Id FROM Account LIMIT 5").await?;
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "63.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-sf-mcp/", env!("CARGO_PKG_VERSION"));
