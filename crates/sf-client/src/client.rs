//! Low-level HTTP client.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};

/// Pooled HTTP client shared by every session.
///
/// Each request is sent once. A non-success response becomes an [`Error`]
/// carrying the parsed Salesforce error body when there is one.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Patch, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Send a request and map Salesforce error bodies to [`Error`].
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.execute_once(&request).await?;
        response.check_salesforce_error().await
    }

    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self.inner.request(request.method.into(), &request.url);
        if let Some(token) = &request.bearer_token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            if response.status().is_success() {
                debug!(status, "Salesforce responded");
            } else {
                info!(status, "Salesforce returned an error status");
            }
        }

        Ok(Response::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v63.0/sobjects"))
            .and(header("Authorization", "Bearer 00Dxx!token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let response = client
            .execute(
                client
                    .get(format!("{}/services/data/v63.0/sobjects", mock_server.uri()))
                    .bearer_auth("00Dxx!token"),
            )
            .await
            .unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_json_body_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tooling/sobjects/DebugLevel"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({"DeveloperName": "MCP_FINEST"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "7dl000000000001AAA", "success": true, "errors": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let request = client
            .post(format!("{}/tooling/sobjects/DebugLevel", mock_server.uri()))
            .json(&serde_json::json!({"DeveloperName": "MCP_FINEST"}))
            .unwrap();
        let body: serde_json::Value = client.execute(request).await.unwrap().json().await.unwrap();

        assert_eq!(body["id"], "7dl000000000001AAA");
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let err = client
            .execute(client.get(format!("{}/flaky", mock_server.uri())))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_salesforce_error_body_is_parsed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([{
                "errorCode": "MALFORMED_QUERY",
                "message": "unexpected token: FROM"
            }])))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let err = client
            .execute(client.get(format!("{}/bad", mock_server.uri())))
            .await
            .unwrap_err();

        match err.kind {
            ErrorKind::SalesforceApi {
                error_code,
                message,
                ..
            } => {
                assert_eq!(error_code, "MALFORMED_QUERY");
                assert_eq!(message, "unexpected token: FROM");
            }
            other => panic!("Expected SalesforceApi error, got {other:?}"),
        }
    }
}
