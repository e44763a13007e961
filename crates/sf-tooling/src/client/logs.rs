use busbar_sf_client::security::url as url_security;
use busbar_sf_rest::QueryBuilder;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::types::ApexLog;

const APEX_LOG_FIELDS: [&str; 8] = [
    "Id",
    "LogUserId",
    "Operation",
    "Application",
    "Status",
    "LogLength",
    "LastModifiedDate",
    "Request",
];

fn invalid_id(log_id: &str) -> Error {
    Error::new(ErrorKind::Salesforce {
        error_code: "INVALID_ID".to_string(),
        message: format!("Invalid Salesforce ID format: {}", log_id),
    })
}

impl super::ToolingClient {
    /// Most recently modified Apex logs written for `user_id`.
    #[instrument(skip(self))]
    pub async fn get_user_apex_logs(&self, user_id: &str, limit: u32) -> Result<Vec<ApexLog>> {
        let builder = QueryBuilder::<ApexLog>::new("ApexLog")?
            .select(&APEX_LOG_FIELDS)?
            .where_eq("LogUserId", user_id)?
            .order_by("LastModifiedDate", false)?
            .limit(limit);

        Ok(self.query_builder(&builder).await?.records)
    }

    /// Metadata for one Apex log, or `None` when no log has that id.
    #[instrument(skip(self))]
    pub async fn get_apex_log(&self, log_id: &str) -> Result<Option<ApexLog>> {
        if !url_security::is_valid_salesforce_id(log_id) {
            return Err(invalid_id(log_id));
        }

        let builder = QueryBuilder::<ApexLog>::new("ApexLog")?
            .select(&APEX_LOG_FIELDS)?
            .where_eq("Id", log_id)?;

        Ok(self.query_builder(&builder).await?.records.into_iter().next())
    }

    /// Get the body of a specific Apex log.
    #[instrument(skip(self))]
    pub async fn get_apex_log_body(&self, log_id: &str) -> Result<String> {
        if !url_security::is_valid_salesforce_id(log_id) {
            return Err(invalid_id(log_id));
        }

        let url = self
            .client
            .tooling_url(&format!("sobjects/ApexLog/{}/Body", log_id));
        self.client.get_text(&url).await.map_err(Into::into)
    }
}
