//! Cached authenticated session.
//!
//! One [`SessionProvider`] is built at process start and shared by every
//! tool. The first call performs the token exchange; later calls reuse the
//! cached session until [`SessionProvider::refresh`] is called. The cache is
//! behind an async mutex so a refresh never races a concurrent read.

use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::config::{AuthConfig, AuthFlow, Environment};
use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::oauth::{OAuthClient, OAuthConfig, TokenResponse};

/// An authenticated session against one org.
#[derive(Clone)]
pub struct Session {
    instance_url: String,
    access_token: String,
    api_version: String,
    environment: Environment,
    username: Option<String>,
    identity_url: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("environment", &self.environment)
            .field("username", &self.username)
            .finish()
    }
}

impl Session {
    fn from_token(token: TokenResponse, config: &AuthConfig) -> Self {
        let username = match config.flow() {
            AuthFlow::Password => config.username.clone(),
            AuthFlow::ClientCredentials => None,
        };

        Self {
            instance_url: token.instance_url.trim_end_matches('/').to_string(),
            access_token: token.access_token,
            api_version: config.api_version.clone(),
            environment: config.environment(),
            username,
            identity_url: token.id,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl Credentials for Session {
    fn instance_url(&self) -> &str {
        &self.instance_url
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }
}

/// Connection metadata reported by the check-connection tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub username: String,
    pub instance_url: String,
    pub environment: Environment,
}

/// Owns the cached session and performs token exchanges.
pub struct SessionProvider {
    config: AuthConfig,
    oauth: OAuthClient,
    cached: Mutex<Option<Session>>,
}

impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionProvider {
    pub fn new(config: AuthConfig) -> Self {
        let mut oauth_config = OAuthConfig::new(config.client_id.clone().unwrap_or_default());
        if let Some(secret) = config.client_secret() {
            oauth_config = oauth_config.with_secret(secret);
        }

        Self {
            oauth: OAuthClient::new(oauth_config),
            config,
            cached: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// The cached session, authenticating on first use.
    pub async fn current(&self) -> Result<Session> {
        self.get_session(false).await
    }

    /// Discard the cached session and authenticate again.
    pub async fn refresh(&self) -> Result<Session> {
        self.get_session(true).await
    }

    /// Return the cached session unless `force_refresh` is set or nothing is cached.
    #[instrument(skip(self))]
    pub async fn get_session(&self, force_refresh: bool) -> Result<Session> {
        let mut cached = self.cached.lock().await;

        if !force_refresh {
            if let Some(session) = cached.as_ref() {
                return Ok(session.clone());
            }
        }

        let session = self.authenticate().await?;
        *cached = Some(session.clone());
        Ok(session)
    }

    /// Username, instance URL and environment of the current session.
    ///
    /// For the client-credentials flow the username is looked up once via the
    /// identity URL and cached. Failure to resolve it yields `Unknown`.
    pub async fn get_session_info(&self) -> Result<SessionInfo> {
        let session = self.current().await?;

        let username = match (&session.username, &session.identity_url) {
            (Some(username), _) => username.clone(),
            (None, Some(id_url)) => match self.oauth.identity(id_url, &session.access_token).await {
                Ok(identity) => {
                    self.remember_username(&session, &identity.username).await;
                    identity.username
                }
                Err(err) => {
                    warn!(error = %err, "Could not resolve session username");
                    "Unknown".to_string()
                }
            },
            (None, None) => "Unknown".to_string(),
        };

        Ok(SessionInfo {
            username,
            instance_url: session.instance_url,
            environment: session.environment,
        })
    }

    async fn remember_username(&self, session: &Session, username: &str) {
        let mut cached = self.cached.lock().await;
        if let Some(current) = cached.as_mut() {
            if current.access_token == session.access_token {
                current.username = Some(username.to_string());
            }
        }
    }

    async fn authenticate(&self) -> Result<Session> {
        self.config.validate()?;
        let token_url = self.config.token_url()?;

        let token = match self.config.flow() {
            AuthFlow::ClientCredentials => self.oauth.client_credentials(&token_url).await?,
            AuthFlow::Password => {
                let username = self.config.username.as_deref().unwrap_or_default();
                let password = self.config.password_with_token().ok_or_else(|| {
                    Error::new(ErrorKind::InvalidCredentials(
                        "SALESFORCE_PASSWORD must be provided.".to_string(),
                    ))
                })?;
                self.oauth.password(&token_url, username, &password).await?
            }
        };

        let session = Session::from_token(token, &self.config);
        info!(
            instance_url = %session.instance_url,
            environment = %session.environment,
            "Authenticated with Salesforce"
        );
        Ok(session)
    }
}
