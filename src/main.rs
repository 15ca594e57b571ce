//! Supabase MCP Server binary entry point.
//!
//! This binary provides a stdio-based MCP server for Supabase record operations.
//! All logs go to stderr; stdout is reserved for MCP JSON-RPC messages.
//!
//! Coverage is excluded because the main function cannot be unit tested
//! as it requires the full MCP protocol handshake over stdio.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use supabase_mcp::config::{log_filter, Config, DEFAULT_LOG_LEVEL};
use supabase_mcp::server::McpServer;
use tracing_subscriber::filter::EnvFilter;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Default level when config fails, so the error is still logged
    let config = Config::from_env();
    let filter = config
        .as_ref()
        .map_or_else(|_| log_filter(DEFAULT_LOG_LEVEL), Config::log_filter);
    init_tracing(filter);

    tracing::info!("supabase-mcp starting...");

    // Missing credentials are fatal at startup, never a per-call error
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "Configuration error: {e}. Please set SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY."
            );
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: url={}, schema={}, log_level={}, timeout={:?}",
        config.supabase_url,
        config.schema,
        config.log_level,
        config.request_timeout_ms
    );

    let server = McpServer::new(config);
    if let Err(e) = server.run_stdio().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("supabase-mcp shutdown complete");
}

/// Initialize logging to stderr only (stdout is for MCP JSON-RPC).
///
/// `LOG_FORMAT=json` switches to structured output.
#[cfg_attr(coverage_nightly, coverage(off))]
fn init_tracing(filter: EnvFilter) {
    let use_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if use_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    }
}
