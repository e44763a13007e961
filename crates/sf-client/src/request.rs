//! Outgoing request description.

use serde::Serialize;

use crate::error::Result;

/// The verbs the REST and Tooling endpoints need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request waiting to be sent by [`SfHttpClient::execute`](crate::SfHttpClient::execute).
///
/// The bearer token is never logged.
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) bearer_token: Option<String>,
    pub(crate) body: Option<serde_json::Value>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .field("body", &self.body)
            .finish()
    }
}

impl RequestBuilder {
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer_token: None,
            body: None,
        }
    }

    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Attach a JSON body. Sent with `Content-Type: application/json`.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_flag_patch_request() {
        let request = RequestBuilder::new(
            RequestMethod::Patch,
            "https://acme.my.salesforce.com/services/data/v63.0/tooling/sobjects/TraceFlag/7tf",
        )
        .bearer_auth("00Dxx!token")
        .json(&serde_json::json!({"ExpirationDate": "2026-10-17T10:00:00.000Z"}))
        .unwrap();

        assert_eq!(request.method(), RequestMethod::Patch);
        assert!(request.url().ends_with("/tooling/sobjects/TraceFlag/7tf"));
        assert_eq!(
            request.body,
            Some(serde_json::json!({"ExpirationDate": "2026-10-17T10:00:00.000Z"}))
        );
    }

    #[test]
    fn test_debug_redacts_bearer_token() {
        let request = RequestBuilder::new(RequestMethod::Get, "https://acme.my.salesforce.com")
            .bearer_auth("00Dxx!secret-session");
        let debug = format!("{request:?}");
        assert!(!debug.contains("secret-session"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(reqwest::Method::from(RequestMethod::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(RequestMethod::Delete), reqwest::Method::DELETE);
    }
}
