//! # sf-auth
//!
//! Salesforce authentication for the MCP server.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Transport errors that mention tokens are replaced with a redacted message
//!
//! ## Supported Flows
//!
//! - **OAuth 2.0 Client Credentials** - the default, against a My Domain URL
//! - **OAuth 2.0 Username-Password** - when a username and password are configured
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_auth::{AuthConfig, SessionProvider};
//!
//! let sessions = SessionProvider::new(AuthConfig::from_env());
//! let session = sessions.current().await?;
//! println!("{}", session.instance_url());
//! ```

mod config;
mod credentials;
mod error;
mod oauth;
mod session;

pub use config::{AuthConfig, AuthFlow, Environment};
pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};
pub use oauth::{IdentityInfo, OAuthClient, OAuthConfig, TokenResponse};
pub use session::{Session, SessionInfo, SessionProvider};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
