use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Result;
use busbar_sf_client::QueryResult;

impl super::SalesforceRestClient {
    /// Execute a SOQL query and return the first page.
    ///
    /// Values spliced into the query text must already be escaped with
    /// `busbar_sf_client::security::soql`.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.client.query(soql).await.map_err(Into::into)
    }
}
