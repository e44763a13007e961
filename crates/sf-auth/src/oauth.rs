//! OAuth 2.0 token exchange.
//!
//! Two grants are supported:
//! - **Client Credentials** - connected app runs as its configured integration user
//! - **Username-Password** - legacy grant for orgs without a My Domain setup

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// OAuth 2.0 configuration for a connected app.
///
/// `consumer_secret` is redacted in Debug output.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Consumer key (client_id).
    pub consumer_key: String,
    /// Consumer secret (client_secret).
    consumer_secret: Option<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

impl OAuthConfig {
    /// Create a new OAuth config.
    pub fn new(consumer_key: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: None,
        }
    }

    /// Set the consumer secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(secret.into());
        self
    }

    pub(crate) fn consumer_secret(&self) -> Option<&str> {
        self.consumer_secret.as_deref()
    }
}

/// OAuth client for authenticating with Salesforce.
#[derive(Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    /// Create a new OAuth client.
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the OAuth config.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Exchange the connected-app credentials for an access token.
    #[instrument(skip(self))]
    pub async fn client_credentials(&self, token_url: &str) -> Result<TokenResponse> {
        let mut params = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.config.consumer_key.as_str()),
        ];

        if let Some(secret) = self.config.consumer_secret() {
            params.push(("client_secret", secret));
        }

        self.request_token(token_url, &params).await
    }

    /// Exchange a username and password (with security token appended) for an access token.
    ///
    /// The password is not logged.
    #[instrument(skip(self, password))]
    pub async fn password(
        &self,
        token_url: &str,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse> {
        let mut params = vec![
            ("grant_type", "password"),
            ("client_id", self.config.consumer_key.as_str()),
            ("username", username),
            ("password", password),
        ];

        if let Some(secret) = self.config.consumer_secret() {
            params.push(("client_secret", secret));
        }

        self.request_token(token_url, &params).await
    }

    /// Fetch the identity document behind the token's `id` URL.
    #[instrument(skip(self, access_token))]
    pub async fn identity(&self, id_url: &str, access_token: &str) -> Result<IdentityInfo> {
        let response = self
            .http_client
            .get(id_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::new(ErrorKind::Http(format!(
                "Identity request failed with status {}",
                response.status().as_u16()
            ))));
        }

        Ok(response.json().await?)
    }

    async fn request_token(&self, token_url: &str, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let body = serde_urlencoded::to_string(params)?;

        let response = self
            .http_client
            .post(token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        self.handle_token_response(response).await
    }

    /// Handle a token response, checking for errors.
    async fn handle_token_response(&self, response: reqwest::Response) -> Result<TokenResponse> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(error) => Error::new(ErrorKind::OAuth {
                    error: error.error,
                    description: error.error_description,
                }),
                Err(_) => Error::new(ErrorKind::Http(format!(
                    "Token request failed with status {}",
                    status.as_u16()
                ))),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Token response from OAuth.
///
/// `access_token` and `signature` are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Instance URL.
    pub instance_url: String,
    /// Identity URL (`https://login.salesforce.com/id/{org}/{user}`).
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issued at timestamp (epoch millis as a string).
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Subset of the identity document.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityInfo {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}
