use busbar_sf_tooling::{DebugLevel, LogLevel, NewTraceFlag, ToolingClient, TraceFlagUpdate};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::users::UserRecord;
use super::CONTEXT;
use crate::error::{ToolError, ToolResult};

/// Added to an existing flag's expiration when logging is enabled again.
const EXTENSION: Duration = Duration::seconds(30);

pub(super) fn display_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

async fn debug_level_id(tooling: &ToolingClient, level: LogLevel) -> Result<String, ToolError> {
    let existing = tooling
        .find_debug_level(level)
        .await
        .map_err(|err| ToolError::remote(CONTEXT, err))?;

    match existing {
        Some(id) => Ok(id),
        None => {
            info!(%level, "Creating debug level");
            tooling
                .create_debug_level(&DebugLevel::uniform(level))
                .await
                .map_err(|err| ToolError::remote(CONTEXT, err))
        }
    }
}

/// Extend the user's active trace flag, or create one lasting `minutes`.
pub(super) async fn enable(
    tooling: &ToolingClient,
    user: &UserRecord,
    input: &str,
    level: LogLevel,
    minutes: u32,
    now: DateTime<Utc>,
) -> ToolResult {
    let active = tooling
        .get_active_trace_flags(&user.id, now)
        .await
        .map_err(|err| ToolError::remote(CONTEXT, err))?;
    let level_id = debug_level_id(tooling, level).await?;

    if let Some(flag) = active.first() {
        let expiration = flag.expires_at().unwrap_or(now) + EXTENSION;
        tooling
            .update_trace_flag(
                &flag.id,
                &TraceFlagUpdate::expire_at(expiration).with_debug_level(&level_id),
            )
            .await
            .map_err(|err| ToolError::remote(CONTEXT, err))?;

        return Ok(format!(
            "Successfully updated debug log expiration for user '{}'.\n\n\
             **Log Level:** {}\n\
             **New Expiration:** {} UTC\n\
             **Trace Flag ID:** {}\n",
            input,
            level,
            display_time(expiration),
            flag.id
        ));
    }

    let expiration = now + Duration::minutes(i64::from(minutes));
    let flag_id = tooling
        .create_trace_flag(&NewTraceFlag::user_debug(&user.id, &level_id, now, expiration))
        .await
        .map_err(|err| ToolError::remote(CONTEXT, err))?;

    Ok(format!(
        "Successfully enabled debug logs for user '{}'.\n\n\
         **Log Level:** {}\n\
         **Expiration:** {} UTC ({} minutes from now)\n\
         **Trace Flag ID:** {}\n",
        input,
        level,
        display_time(expiration),
        minutes,
        flag_id
    ))
}
