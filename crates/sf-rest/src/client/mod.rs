//! Describe and query over the REST API.

use busbar_sf_client::SalesforceClient;

use crate::error::Result;

mod describe;
mod query;

/// REST endpoints used by the schema and record tools.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_sf_rest::SalesforceRestClient;
///
/// let client = SalesforceRestClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
///
/// let catalog = client.describe_global().await?;
/// let account = client.describe_sobject("Account").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_current_api_version() {
        let client = SalesforceRestClient::new("https://acme.my.salesforce.com", "00Dxx!token")
            .unwrap();
        assert_eq!(client.api_version(), "63.0");
        assert_eq!(
            client.inner().rest_url("sobjects/Account/describe"),
            "https://acme.my.salesforce.com/services/data/v63.0/sobjects/Account/describe"
        );
    }
}
