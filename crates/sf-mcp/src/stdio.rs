//! Newline-delimited JSON-RPC over a reader/writer pair.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::handlers::{handle_request, ToolProvider};
use crate::protocol::{Response, PARSE_ERROR};

/// Handle one input line and return the serialized response, if any.
pub async fn handle_line(line: &str, provider: &impl ToolProvider) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str(trimmed) {
        Ok(request) => handle_request(request, provider)
            .await
            .and_then(|response| serde_json::to_string(&response).ok()),
        Err(err) => parse_error(format!("Parse error: {err}")),
    }
}

/// Handle one raw input line. Bytes that are not UTF-8 get a parse error.
pub async fn handle_bytes(line: &[u8], provider: &impl ToolProvider) -> Option<String> {
    match std::str::from_utf8(line) {
        Ok(text) => handle_line(text, provider).await,
        Err(err) => parse_error(format!("Parse error: invalid UTF-8: {err}")),
    }
}

fn parse_error(message: String) -> Option<String> {
    warn!(%message, "Unparseable request");
    let response = Response::error(Value::Null, PARSE_ERROR, message);
    serde_json::to_string(&response).ok()
}

/// Serve requests one at a time until `reader` reaches end of input.
pub async fn serve<R, W>(mut reader: R, mut writer: W, provider: &impl ToolProvider) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        if let Some(response) = handle_bytes(&line, provider).await {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
}
