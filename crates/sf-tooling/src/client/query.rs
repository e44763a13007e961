use serde::de::DeserializeOwned;
use tracing::instrument;

use busbar_sf_client::QueryResult;
use busbar_sf_rest::QueryBuilder;

use crate::error::Result;

impl super::ToolingClient {
    /// Execute a SOQL query against the Tooling API and return the first page.
    ///
    /// # Security
    ///
    /// Values spliced into the WHERE clause must be escaped with
    /// `busbar_sf_client::security::soql`, or built with [`QueryBuilder`].
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.client.tooling_query(soql).await.map_err(Into::into)
    }

    /// Render a [`QueryBuilder`] and run it against the Tooling API.
    pub async fn query_builder<T: DeserializeOwned>(
        &self,
        builder: &QueryBuilder<T>,
    ) -> Result<QueryResult<T>> {
        let soql = builder.build()?;
        self.query(&soql).await
    }
}

#[cfg(test)]
mod tests {
    use crate::ToolingClient;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_query_hits_tooling_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v63.0/tooling/query"))
            .and(query_param("q", "SELECT Id FROM DebugLevel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 1,
                "done": true,
                "records": [{"Id": "7dl000000000001"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ToolingClient::new(server.uri(), "token").unwrap();
        let result = client
            .query::<serde_json::Value>("SELECT Id FROM DebugLevel")
            .await
            .unwrap();

        assert_eq!(result.total_size, 1);
        assert_eq!(result.records[0]["Id"], "7dl000000000001");
    }
}
