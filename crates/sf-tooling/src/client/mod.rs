//! Tooling API client, split by concern across the submodules.

use busbar_sf_client::SalesforceClient;

use crate::error::Result;

mod logs;
mod query;
mod sobject;
mod trace_flags;
mod validation;

/// Tooling endpoints behind the debug-log and validation-rule tools.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_sf_tooling::ToolingClient;
///
/// let client = ToolingClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
///
/// let rules = client.get_validation_rules("Account").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ToolingClient {
    client: SalesforceClient,
}

impl ToolingClient {
    /// Standalone client with its own connection pool.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Ok(Self::from_client(SalesforceClient::new(instance_url, access_token)?))
    }

    /// Wrap a session-bound client; the pool is shared with its other users.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }
}
