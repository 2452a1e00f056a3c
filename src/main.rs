use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

use unified_reasoning::UnifiedReasoningService;

/// Logs go to stderr; stdout carries the MCP frames.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let service = UnifiedReasoningService::new()
        .await
        .context("failed to load reasoning configuration")?;

    let running = service.serve(stdio()).await?;
    tracing::info!(
        "unified-reasoning {} listening on stdio",
        env!("CARGO_PKG_VERSION")
    );

    let reason = running.waiting().await?;
    tracing::info!("Transport closed ({:?}), exiting", reason);
    Ok(())
}
