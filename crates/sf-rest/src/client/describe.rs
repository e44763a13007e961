use tracing::instrument;

use crate::describe::{DescribeGlobalResult, DescribeSObjectResult};
use crate::error::{Error, ErrorKind, Result};
use busbar_sf_client::security::soql;

impl super::SalesforceRestClient {
    /// Get a list of all SObjects available in the org.
    #[instrument(skip(self))]
    pub async fn describe_global(&self) -> Result<DescribeGlobalResult> {
        self.client
            .rest_get("sobjects")
            .await
            .map_err(Into::into)
    }

    /// Get detailed metadata for a specific SObject.
    #[instrument(skip(self))]
    pub async fn describe_sobject(&self, sobject: &str) -> Result<DescribeSObjectResult> {
        let path = describe_path(sobject)?;
        self.client.rest_get(&path).await.map_err(Into::into)
    }

    /// Describe an SObject and return the payload exactly as Salesforce sent it.
    #[instrument(skip(self))]
    pub async fn describe_sobject_raw(&self, sobject: &str) -> Result<serde_json::Value> {
        let path = describe_path(sobject)?;
        self.client.rest_get(&path).await.map_err(Into::into)
    }
}

/// A name that cannot be an API name cannot exist in the org either.
fn describe_path(sobject: &str) -> Result<String> {
    if !soql::is_safe_sobject_name(sobject) {
        return Err(Error::new(ErrorKind::NotFound(format!(
            "Invalid SObject name: {}",
            sobject
        ))));
    }
    Ok(format!("sobjects/{}/describe", sobject))
}
