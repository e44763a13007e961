//! Connection settings read from the environment.

use crate::error::{Error, ErrorKind, Result};
use crate::{PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL};

/// Which org flavour the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Sandbox,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Sandbox => write!(f, "Sandbox"),
        }
    }
}

/// OAuth grant used for the token exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    ClientCredentials,
    Password,
}

/// Connected-app credentials and target org.
///
/// Secrets are redacted in Debug output. Nothing is validated at
/// construction; [`AuthConfig::validate`] runs before every token exchange
/// so a misconfigured server still starts and reports the problem per call.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub client_id: Option<String>,
    client_secret: Option<String>,
    pub domain_url: Option<String>,
    pub username: Option<String>,
    password: Option<String>,
    security_token: Option<String>,
    pub sandbox: bool,
    pub api_version: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("domain_url", &self.domain_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sandbox", &self.sandbox)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl AuthConfig {
    /// Client-credentials configuration.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            api_version: busbar_sf_client::DEFAULT_API_VERSION.to_string(),
            ..Default::default()
        }
    }

    pub fn with_domain_url(mut self, url: impl Into<String>) -> Self {
        self.domain_url = Some(url.into());
        self
    }

    /// Switch to the username-password flow.
    pub fn with_password(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Load from `SALESFORCE_*` variables, falling back to `SF_*`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |suffix: &str| {
            lookup(&format!("SALESFORCE_{suffix}"))
                .or_else(|| lookup(&format!("SF_{suffix}")))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let sandbox = get("SANDBOX")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            client_id: get("CLIENT_ID"),
            client_secret: get("CLIENT_SECRET"),
            domain_url: get("DOMAIN_URL"),
            username: get("USERNAME"),
            password: get("PASSWORD"),
            security_token: get("SECURITY_TOKEN"),
            sandbox,
            api_version: get("API_VERSION")
                .unwrap_or_else(|| busbar_sf_client::DEFAULT_API_VERSION.to_string()),
        }
    }

    pub(crate) fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Password with the security token appended, as the password grant expects.
    pub(crate) fn password_with_token(&self) -> Option<String> {
        let password = self.password.as_deref()?;
        Some(format!(
            "{}{}",
            password,
            self.security_token.as_deref().unwrap_or_default()
        ))
    }

    pub fn flow(&self) -> AuthFlow {
        if self.username.is_some() && self.password.is_some() {
            AuthFlow::Password
        } else {
            AuthFlow::ClientCredentials
        }
    }

    /// Sandbox when flagged, or when the domain is a sandbox/test host.
    pub fn environment(&self) -> Environment {
        if self.sandbox {
            return Environment::Sandbox;
        }

        let host = self
            .domain_url
            .as_deref()
            .and_then(|d| url::Url::parse(d).ok())
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase));

        match host {
            Some(h) if h.contains(".sandbox.") || h == "test.salesforce.com" => {
                Environment::Sandbox
            }
            _ => Environment::Production,
        }
    }

    /// Check that everything the selected flow needs is present.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_none() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "SALESFORCE_CLIENT_ID must be provided.".to_string(),
            )));
        }
        if self.client_secret.is_none() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "SALESFORCE_CLIENT_SECRET must be provided.".to_string(),
            )));
        }
        if self.flow() == AuthFlow::ClientCredentials && self.domain_url.is_none() {
            return Err(Error::new(ErrorKind::Config(
                "SALESFORCE_DOMAIN_URL must be provided.".to_string(),
            )));
        }
        Ok(())
    }

    /// `{domain}/services/oauth2/token`, or the login host for the password flow.
    pub fn token_url(&self) -> Result<String> {
        let base = match (&self.domain_url, self.flow()) {
            (Some(domain), _) => {
                url::Url::parse(domain)?;
                domain.trim_end_matches('/').to_string()
            }
            (None, AuthFlow::Password) => match self.environment() {
                Environment::Sandbox => SANDBOX_LOGIN_URL.to_string(),
                Environment::Production => PRODUCTION_LOGIN_URL.to_string(),
            },
            (None, AuthFlow::ClientCredentials) => {
                return Err(Error::new(ErrorKind::Config(
                    "SALESFORCE_DOMAIN_URL must be provided.".to_string(),
                )))
            }
        };
        Ok(format!("{}/services/oauth2/token", base))
    }
}
