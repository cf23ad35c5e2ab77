//! HealthStat
//!
//! An MCP server for personal health metrics and an AI health assistant.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use healthstat::build_info;
use healthstat::chat::{ChatRelay, GeminiClient, LanguageModel};
use healthstat::config::Config;
use healthstat::mcp::HealthStatService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("healthstat=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Chart directory: {}", config.chart_dir.display());

    // The assistant is optional; without a key chat requests report the missing key
    let relay = match &config.gemini_api_key {
        Some(key) => {
            eprintln!("Health assistant model: {}", config.gemini_model);
            let client = GeminiClient::new(&config.gemini_base_url, &config.gemini_model, key.clone());
            ChatRelay::new(Some(Arc::new(client) as Arc<dyn LanguageModel>))
        }
        None => {
            tracing::warn!("No Gemini API key configured; health_chat is disabled");
            ChatRelay::unconfigured()
        }
    };

    // Create the HealthStat service
    let service = HealthStatService::new(&config, relay);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
