//! Server configuration.

use std::path::PathBuf;
use std::time::Duration;

use busbar_sf_auth::AuthConfig;
use busbar_sf_client::ClientConfig;

/// Everything the server reads from its environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub auth: AuthConfig,
    /// Extra log destination (`SF_MCP_LOG_FILE`). Logs always go to stderr.
    pub log_file: Option<PathBuf>,
    pub http: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut http = ClientConfig::builder();
        if let Some(secs) = get("SF_MCP_HTTP_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            http = http.with_timeout(Duration::from_secs(secs.max(1)));
        }

        Self {
            log_file: get("SF_MCP_LOG_FILE").map(PathBuf::from),
            http: http.build(),
            auth: AuthConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_auth_and_log_file() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SALESFORCE_CLIENT_ID", "cid"),
            ("SALESFORCE_DOMAIN_URL", "https://acme.my.salesforce.com"),
            ("SF_MCP_LOG_FILE", "/tmp/sf-mcp.log"),
            ("SF_MCP_HTTP_TIMEOUT_SECS", "12"),
        ]));

        assert_eq!(config.auth.client_id.as_deref(), Some("cid"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/sf-mcp.log")));
        assert_eq!(config.http.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_blank_log_file_is_unset() {
        let config = ServerConfig::from_lookup(lookup(&[("SF_MCP_LOG_FILE", "  ")]));
        assert!(config.log_file.is_none());
        assert_eq!(config.http.timeout, ClientConfig::default().timeout);
    }
}
