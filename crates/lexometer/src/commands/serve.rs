//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use lexometer_core::config::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // No subcommand-specific arguments; stdio is the only transport.
}

/// Run the MCP server until the client disconnects.
///
/// Statistics defaults and the input limit come from the loaded config.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let statistics = config
        .statistics_config()
        .context("invalid statistics configuration")?;
    let server = ProjectServer::new()
        .with_statistics_config(statistics)
        .with_max_input_bytes(max_input_bytes);

    info!("starting MCP server on stdio");
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;
    info!("MCP server stopped");

    Ok(())
}
