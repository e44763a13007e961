use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use busbar_sf_mcp_server::{stdio, SalesforceTools, ServerConfig};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// stdout carries the protocol, so logs go to stderr and optionally a file.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_file.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.auth.environment(),
        flow = ?config.auth.flow(),
        "Starting Salesforce MCP server"
    );

    let tools = SalesforceTools::from_config(&config).context("building HTTP client")?;
    stdio::serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), &tools).await?;

    info!("Input closed, shutting down");
    Ok(())
}
