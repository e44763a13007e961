use chrono::{DateTime, Utc};
use busbar_sf_rest::QueryBuilder;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::types::*;

#[derive(Debug, serde::Deserialize)]
struct IdRow {
    #[serde(rename = "Id")]
    id: String,
}

impl super::ToolingClient {
    /// Trace flags on `user_id` that expire after `now`.
    #[instrument(skip(self))]
    pub async fn get_active_trace_flags(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<TraceFlag>> {
        let builder = QueryBuilder::<TraceFlag>::new("TraceFlag")?
            .select(&["Id", "DebugLevelId", "ExpirationDate"])?
            .where_eq("TracedEntityId", user_id)?
            .where_gt_literal("ExpirationDate", format_datetime(now))?;

        let flags = self.query_builder(&builder).await?.records;
        debug!(count = flags.len(), "Active trace flags");
        Ok(flags)
    }

    /// Id of a debug level whose Apex code category is `level`.
    #[instrument(skip(self))]
    pub async fn find_debug_level(&self, level: LogLevel) -> Result<Option<String>> {
        let builder = QueryBuilder::<IdRow>::new("DebugLevel")?
            .select(&["Id"])?
            .where_eq("ApexCode", level.to_string())?;

        let rows = self.query_builder(&builder).await?.records;
        Ok(rows.into_iter().next().map(|row| row.id))
    }

    /// Create a debug level and return its id.
    pub async fn create_debug_level(&self, level: &DebugLevel) -> Result<String> {
        self.create("DebugLevel", level).await
    }

    /// Create a trace flag and return its id.
    pub async fn create_trace_flag(&self, flag: &NewTraceFlag) -> Result<String> {
        self.create("TraceFlag", flag).await
    }

    pub async fn update_trace_flag(&self, id: &str, update: &TraceFlagUpdate) -> Result<()> {
        self.update("TraceFlag", id, update).await
    }

    pub async fn delete_trace_flag(&self, id: &str) -> Result<()> {
        self.delete("TraceFlag", id).await
    }
}
