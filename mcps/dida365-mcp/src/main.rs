//! Dida365 MCP Server
//!
//! Exposes Dida365 (TickTick CN) tasks, projects, tags and derived views as
//! MCP tools over stdio.
//!
//! # Configuration
//! `~/.dida365/config.toml` (or `DIDA365_CONFIG_PATH`), overridden by
//! `DIDA365_*` environment variables.

use anyhow::Context;
use rmcp::{transport::stdio, ServiceExt};

use dida365_core::Config;
use dida365_mcp::init::{init_tracing, DEFAULT_DIRECTIVES};
use dida365_mcp::Dida365McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(DEFAULT_DIRECTIVES)?;

    tracing::info!("Starting Dida365 MCP Server");

    let config = Config::load().context("failed to load configuration")?;
    tracing::info!("Private API: {}", config.api.private_base_url);

    let server = Dida365McpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
