use busbar_sf_tooling::{parse_datetime, ApexLog, ToolingClient};

use super::enable::display_time;
use super::users::UserRecord;
use crate::error::{ToolError, ToolResult};
use crate::format::or_na;

const BODY_HINT: &str =
    "To view the full log content, add \"include_body\": true to your request.";

fn log_details(log: &ApexLog) -> String {
    let size = log
        .log_length
        .map_or_else(|| "N/A".to_string(), |len| len.to_string());
    let date = match log.last_modified_date.as_deref() {
        Some(raw) => parse_datetime(raw).map_or_else(|| raw.to_string(), display_time),
        None => "N/A".to_string(),
    };

    format!(
        "- **ID:** {}\n\
         - **Operation:** {}\n\
         - **Application:** {}\n\
         - **Status:** {}\n\
         - **Size:** {} bytes\n\
         - **Date:** {}\n",
        log.id,
        or_na(log.operation.as_deref()),
        or_na(log.application.as_deref()),
        or_na(log.status.as_deref()),
        size,
        date
    )
}

/// One log's metadata, and its body when asked for.
pub(super) async fn retrieve_one(
    tooling: &ToolingClient,
    log_id: &str,
    include_body: bool,
) -> ToolResult {
    let log = tooling
        .get_apex_log(log_id)
        .await
        .map_err(|err| ToolError::remote("Error retrieving log", err))?
        .ok_or_else(|| ToolError::NotFound(format!("No log found with ID '{log_id}'.")))?;

    let mut text = format!("**Log Details:**\n{}", log_details(&log));

    if include_body {
        let body = tooling
            .get_apex_log_body(log_id)
            .await
            .map_err(|err| ToolError::remote("Error retrieving log body", err))?;
        text.push_str(&format!("\n**Log Body:**\n```\n{body}\n```\n"));
    } else {
        text.push('\n');
        text.push_str(BODY_HINT);
        text.push('\n');
    }

    Ok(text)
}

/// The user's most recent logs, newest first.
pub(super) async fn retrieve_recent(
    tooling: &ToolingClient,
    user: &UserRecord,
    input: &str,
    limit: u32,
) -> ToolResult {
    let logs = tooling
        .get_user_apex_logs(&user.id, limit)
        .await
        .map_err(|err| ToolError::remote("Error retrieving logs", err))?;

    if logs.is_empty() {
        return Ok(format!("No debug logs found for user '{input}'."));
    }

    let mut text = format!("Found {} debug logs for user '{}':\n\n", logs.len(), input);
    for (i, log) in logs.iter().enumerate() {
        text.push_str(&format!("**Log {}**\n{}\n", i + 1, log_details(log)));
    }
    text.push_str(
        "To view a specific log, pass its ID as \"log_id\" with the 'retrieve' operation, \
         and add \"include_body\": true for the full content:\n\
         ```json\n\
         {\"operation\": \"retrieve\", \"username\": \"<username>\", \
         \"log_id\": \"<log ID>\", \"include_body\": true}\n\
         ```\n",
    );

    Ok(text)
}

#[cfg(test)]
mod tests {
    use crate::adapters::test_support::{mock_org, mount_user, query_page, TOOLING_QUERY};
    use crate::adapters::DebugLogRequest;
    use crate::error::ToolError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param_contains};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOG_ID: &str = "07L000000000001AAA";

    fn log_row(id: &str, length: i64) -> serde_json::Value {
        json!({
            "Id": id,
            "LogUserId": "005000000000001AAA",
            "Operation": "/apex/Checkout",
            "Application": "Browser",
            "Status": "Success",
            "LogLength": length,
            "LastModifiedDate": "2026-10-17T09:30:00.000+0000",
            "Request": "Api"
        })
    }

    async fn mount_single_log(server: &MockServer, rows: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(TOOLING_QUERY))
            .and(query_param_contains("q", format!("WHERE Id = '{LOG_ID}'")))
            .respond_with(query_page(rows))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_retrieve_recent_logs() {
        let (server, tools) = mock_org().await;
        mount_user(&server, "ada@acme.com", true).await;

        Mock::given(method("GET"))
            .and(path(TOOLING_QUERY))
            .and(query_param_contains(
                "q",
                "WHERE LogUserId = '005000000000001AAA' ORDER BY LastModifiedDate DESC LIMIT 2",
            ))
            .respond_with(query_page(json!([
                log_row("07L000000000001AAA", 2048),
                log_row("07L000000000002AAA", 512)
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let request = DebugLogRequest::new("retrieve", "ada@acme.com").with_limit(2);
        let text = tools.manage_debug_logs(&request).await.unwrap();

        assert!(text.starts_with("Found 2 debug logs for user 'ada@acme.com':\n\n**Log 1**\n"));
        assert!(text.contains("- **ID:** 07L000000000001AAA\n"));
        assert!(text.contains("- **Operation:** /apex/Checkout\n"));
        assert!(text.contains("- **Size:** 2048 bytes\n"));
        assert!(text.contains("- **Date:** 2026-10-17 09:30:00\n"));
        assert!(text.contains("**Log 2**\n- **ID:** 07L000000000002AAA"));
        assert!(text.contains("\"include_body\": true"));
    }

    #[tokio::test]
    async fn test_retrieve_recent_logs_empty() {
        let (server, tools) = mock_org().await;
        mount_user(&server, "ada@acme.com", true).await;
        Mock::given(method("GET"))
            .and(path(TOOLING_QUERY))
            .respond_with(query_page(json!([])))
            .mount(&server)
            .await;

        let text = tools
            .manage_debug_logs(&DebugLogRequest::new("retrieve", "ada@acme.com"))
            .await
            .unwrap();
        assert_eq!(text, "No debug logs found for user 'ada@acme.com'.");
    }

    #[tokio::test]
    async fn test_retrieve_single_log_with_body() {
        let (server, tools) = mock_org().await;
        mount_user(&server, "ada@acme.com", true).await;
        mount_single_log(&server, json!([log_row(LOG_ID, 42)])).await;

        Mock::given(method("GET"))
            .and(path(format!("/services/data/v63.0/tooling/sobjects/ApexLog/{LOG_ID}/Body")))
            .respond_with(ResponseTemplate::new(200).set_body_string("USER_DEBUG|[1]|hello"))
            .expect(1)
            .mount(&server)
            .await;

        let request = DebugLogRequest::new("retrieve", "ada@acme.com")
            .with_log_id(LOG_ID)
            .with_body(true);
        let text = tools.manage_debug_logs(&request).await.unwrap();

        assert!(text.starts_with("**Log Details:**\n- **ID:** 07L000000000001AAA\n"));
        assert!(text.contains("- **Size:** 42 bytes\n"));
        assert!(text.ends_with("**Log Body:**\n```\nUSER_DEBUG|[1]|hello\n```\n"));
    }

    #[tokio::test]
    async fn test_retrieve_single_log_without_body_adds_hint() {
        let (server, tools) = mock_org().await;
        mount_user(&server, "ada@acme.com", true).await;
        mount_single_log(&server, json!([log_row(LOG_ID, 42)])).await;

        let request = DebugLogRequest::new("retrieve", "ada@acme.com").with_log_id(LOG_ID);
        let text = tools.manage_debug_logs(&request).await.unwrap();
        assert!(text.ends_with(
            "\nTo view the full log content, add \"include_body\": true to your request.\n"
        ));
    }

    #[tokio::test]
    async fn test_retrieve_body_failure_replaces_output() {
        let (server, tools) = mock_org().await;
        mount_user(&server, "ada@acme.com", true).await;
        mount_single_log(&server, json!([log_row(LOG_ID, 42)])).await;

        Mock::given(method("GET"))
            .and(path(format!("/services/data/v63.0/tooling/sobjects/ApexLog/{LOG_ID}/Body")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let request = DebugLogRequest::new("retrieve", "ada@acme.com")
            .with_log_id(LOG_ID)
            .with_body(true);
        let err = tools.manage_debug_logs(&request).await.unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Error retrieving log body: "));
        assert!(!text.contains("Log Details"));
    }

    #[tokio::test]
    async fn test_retrieve_unknown_log() {
        let (server, tools) = mock_org().await;
        mount_user(&server, "ada@acme.com", true).await;
        mount_single_log(&server, json!([])).await;

        let request = DebugLogRequest::new("retrieve", "ada@acme.com").with_log_id(LOG_ID);
        let err = tools.manage_debug_logs(&request).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::NotFound(format!("No log found with ID '{LOG_ID}'."))
        );
    }
}
