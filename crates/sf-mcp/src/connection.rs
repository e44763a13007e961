//! Per-call API clients backed by one cached session.

use std::sync::Arc;

use busbar_sf_auth::{Credentials, Session, SessionInfo, SessionProvider};
use busbar_sf_client::{SalesforceClient, SfHttpClient};
use busbar_sf_rest::SalesforceRestClient;
use busbar_sf_tooling::ToolingClient;

use crate::config::ServerConfig;

/// Shared connection state: the session cache and one HTTP connection pool.
///
/// Clients handed out by [`Connection::rest`] and [`Connection::tooling`] are
/// cheap views over the pool bound to the current session's token.
#[derive(Debug, Clone)]
pub struct Connection {
    sessions: Arc<SessionProvider>,
    http: SfHttpClient,
}

impl Connection {
    pub fn new(sessions: SessionProvider, http: SfHttpClient) -> Self {
        Self {
            sessions: Arc::new(sessions),
            http,
        }
    }

    /// Build from configuration. Only the HTTP client is created here; the
    /// token exchange happens on the first tool call.
    pub fn from_config(config: &ServerConfig) -> busbar_sf_client::Result<Self> {
        let http = SfHttpClient::new(config.http.clone())?;
        Ok(Self::new(SessionProvider::new(config.auth.clone()), http))
    }

    pub fn sessions(&self) -> &SessionProvider {
        &self.sessions
    }

    pub async fn session_info(&self) -> busbar_sf_auth::Result<SessionInfo> {
        self.sessions.get_session_info().await
    }

    pub async fn rest(&self) -> busbar_sf_auth::Result<SalesforceRestClient> {
        let session = self.sessions.current().await?;
        Ok(SalesforceRestClient::from_client(self.client_for(&session)))
    }

    pub async fn tooling(&self) -> busbar_sf_auth::Result<ToolingClient> {
        let session = self.sessions.current().await?;
        Ok(ToolingClient::from_client(self.client_for(&session)))
    }

    fn client_for(&self, session: &Session) -> SalesforceClient {
        SalesforceClient::from_http(
            self.http.clone(),
            session.instance_url(),
            session.access_token(),
        )
        .with_api_version(session.api_version())
    }
}
