use tracing::{instrument, warn};

use crate::error::{ToolError, ToolResult};

impl super::SalesforceTools {
    /// Confirm the session works and report who it belongs to.
    ///
    /// A failing describe after a successful login is reported as a partial
    /// connection rather than an error.
    #[instrument(skip(self))]
    pub async fn check_connection(&self) -> ToolResult {
        const CONTEXT: &str = "Error connecting to Salesforce";

        let info = self
            .connection()
            .session_info()
            .await
            .map_err(|err| ToolError::auth(CONTEXT, err))?;
        let rest = self.rest(CONTEXT).await?;

        let status = match rest.describe_global().await {
            Ok(catalog) => format!("Successful ({} objects available)", catalog.sobjects.len()),
            Err(err) => {
                warn!(error = %err, "Describe failed after login");
                format!("Partially working (API connection active but describe failed: {err})")
            }
        };

        Ok(format!(
            "Salesforce connection is active.\n\n\
             Connection Status: {}\n\
             Username: {}\n\
             Instance URL: {}\n\
             Environment: {}",
            status, info.username, info.instance_url, info.environment
        ))
    }
}
