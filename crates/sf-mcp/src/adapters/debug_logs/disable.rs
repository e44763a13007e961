use busbar_sf_tooling::{ToolingClient, TraceFlagUpdate};
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use super::users::UserRecord;
use super::CONTEXT;
use crate::error::{ToolError, ToolResult};

/// How long flags live when they could not be deleted outright.
const GRACE: Duration = Duration::minutes(5);

/// Delete every active trace flag on the user.
///
/// If any delete fails, all flags are instead set to expire shortly.
pub(super) async fn disable(
    tooling: &ToolingClient,
    user: &UserRecord,
    input: &str,
    now: DateTime<Utc>,
) -> ToolResult {
    let active = tooling
        .get_active_trace_flags(&user.id, now)
        .await
        .map_err(|err| ToolError::remote(CONTEXT, err))?;

    if active.is_empty() {
        return Ok(format!("No active debug logs found for user '{input}'."));
    }

    let mut delete_error = None;
    for flag in &active {
        if let Err(err) = tooling.delete_trace_flag(&flag.id).await {
            warn!(flag = %flag.id, error = %err, "Trace flag delete failed, expiring instead");
            delete_error = Some(err);
            break;
        }
    }

    let Some(delete_error) = delete_error else {
        return Ok(format!(
            "Successfully disabled {} debug log configuration(s) for user '{}' by removing them.",
            active.len(),
            input
        ));
    };

    let update = TraceFlagUpdate::expire_at(now + GRACE);
    for flag in &active {
        if let Err(err) = tooling.update_trace_flag(&flag.id, &update).await {
            warn!(flag = %flag.id, error = %err, "Trace flag expiry update failed");
            return Err(ToolError::remote("Error disabling debug logs", delete_error));
        }
    }

    Ok(format!(
        "Successfully disabled {} debug log configuration(s) for user '{}'. \
         They will expire in 5 minutes.",
        active.len(),
        input
    ))
}
