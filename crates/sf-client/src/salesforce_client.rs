//! High-level Salesforce client with typed HTTP methods.
//!
//! The access token is redacted in Debug output and skipped in tracing spans.

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::DEFAULT_API_VERSION;

/// Salesforce API client bound to one instance URL and access token.
///
/// Used by the REST and Tooling crates, which add endpoint-specific methods
/// on top of the typed helpers here.
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Client with its own connection pool and default settings.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let http = SfHttpClient::new(ClientConfig::default())?;
        Ok(Self::from_http(http, instance_url, access_token))
    }

    /// Create a client that shares an existing connection pool.
    pub fn from_http(
        http: SfHttpClient,
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set the API version (e.g., "63.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs are passed through unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// `rest_url("sobjects")` -> `{instance}/services/data/v63.0/sobjects`
    pub fn rest_url(&self, path: &str) -> String {
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// `tooling_url("sobjects/TraceFlag")` -> `{instance}/services/data/v63.0/tooling/sobjects/TraceFlag`
    pub fn tooling_url(&self, path: &str) -> String {
        format!(
            "{}/services/data/v{}/tooling/{}",
            self.instance_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.access_token)
    }

    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.http.patch(url).bearer_auth(&self.access_token)
    }

    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.http.delete(url).bearer_auth(&self.access_token)
    }

    /// Execute a request and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<crate::Response> {
        self.http.execute(request).await
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url));
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// GET request returning the body as text.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let request = self.get(&self.url(url));
        let response = self.http.execute(request).await?;
        response.text().await
    }

    /// GET request to REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json(&self.rest_url(path)).await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(&self.url(url)).json(body)?;
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// POST request to Tooling API with JSON body and response.
    pub async fn tooling_post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.post_json(&self.tooling_url(path), body).await
    }

    /// PATCH request with JSON body. Salesforce answers 204 No Content.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize>(&self, url: &str, body: &B) -> Result<()> {
        let request = self.patch(&self.url(url)).json(body)?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// PATCH request to Tooling API.
    pub async fn tooling_patch<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.patch_json(&self.tooling_url(path), body).await
    }

    /// DELETE request. Salesforce answers 204 No Content.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<()> {
        let request = self.delete(&self.url(url));
        self.http.execute(request).await?;
        Ok(())
    }

    /// DELETE request to Tooling API.
    pub async fn tooling_delete(&self, path: &str) -> Result<()> {
        self.delete_request(&self.tooling_url(path)).await
    }

    // =========================================================================
    // Query Helpers
    // =========================================================================

    /// Execute a SOQL query via REST API.
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let url = format!("{}?q={}", self.rest_url("query"), urlencoding::encode(soql));
        self.get_json(&url).await
    }

    /// Execute a SOQL query via Tooling API.
    pub async fn tooling_query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let url = format!(
            "{}?q={}",
            self.tooling_url("query"),
            urlencoding::encode(soql)
        );
        self.get_json(&url).await
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_building() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token123").unwrap();

        assert_eq!(
            client.url("/services/oauth2/userinfo"),
            "https://na1.salesforce.com/services/oauth2/userinfo"
        );
        assert_eq!(
            client.url("services/oauth2/userinfo"),
            "https://na1.salesforce.com/services/oauth2/userinfo"
        );
        assert_eq!(client.url("https://other.com/path"), "https://other.com/path");
        assert_eq!(
            client.rest_url("sobjects/Account/describe"),
            "https://na1.salesforce.com/services/data/v63.0/sobjects/Account/describe"
        );
        assert_eq!(
            client.tooling_url("sobjects/TraceFlag"),
            "https://na1.salesforce.com/services/data/v63.0/tooling/sobjects/TraceFlag"
        );
    }

    #[test]
    fn test_api_version_and_trailing_slash() {
        let client = SalesforceClient::new("https://na1.salesforce.com/", "token")
            .unwrap()
            .with_api_version("60.0");

        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
        assert_eq!(
            client.rest_url("sobjects"),
            "https://na1.salesforce.com/services/data/v60.0/sobjects"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_query_encodes_soql() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v63.0/query"))
            .and(query_param("q", "SELECT Id FROM Account WHERE Name = 'A&B'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 1,
                "done": true,
                "records": [{"Id": "001000000000001AAA"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SalesforceClient::new(server.uri(), "token").unwrap();
        let result: QueryResult<serde_json::Value> = client
            .query("SELECT Id FROM Account WHERE Name = 'A&B'")
            .await
            .unwrap();

        assert_eq!(result.total_size, 1);
        assert!(result.next_records_url.is_none());
    }

    #[tokio::test]
    async fn test_tooling_patch_and_delete_accept_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v63.0/tooling/sobjects/TraceFlag/7tf000000000001"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/services/data/v63.0/tooling/sobjects/TraceFlag/7tf000000000001"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = SalesforceClient::new(server.uri(), "token").unwrap();
        client
            .tooling_patch(
                "sobjects/TraceFlag/7tf000000000001",
                &json!({"ExpirationDate": "2030-01-01T00:00:00.000Z"}),
            )
            .await
            .unwrap();
        client
            .tooling_delete("sobjects/TraceFlag/7tf000000000001")
            .await
            .unwrap();
    }
}
