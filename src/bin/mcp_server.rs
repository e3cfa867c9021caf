//! MCP Server binary entry point
//!
//! Run with: cargo run --bin simple-mcp

use rmcp::{ServiceExt, transport::stdio};
use simple_mcp::config::Config;
use simple_mcp::logging;
use simple_mcp::mcp::SimpleMcpService;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, warnings) = Config::load();

    // Logs go to stderr (stdout is for MCP protocol)
    logging::init(&config);
    for warning in &warnings {
        warn!("{warning}");
    }

    info!(
        env = %config.env,
        "{} MCP Server v{}",
        config.server_name,
        env!("CARGO_PKG_VERSION")
    );

    let service = SimpleMcpService::new(&config).serve(stdio()).await?;

    info!("MCP server running, waiting for requests...");

    service.waiting().await?;

    info!("MCP server shutting down");
    Ok(())
}
