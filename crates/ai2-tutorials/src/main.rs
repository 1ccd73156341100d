mod browser;
mod catalog;
mod chat;
mod config;
mod detail;
mod error;
mod gateway;
mod model;
mod route;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tutor_common::gemini::{GeminiClient, GeminiClientConfig};

use config::Config;
use gateway::GeminiGateway;
use server::TutorialsServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting ai2-tutorials MCP server");

    let config = Config::from_env()?;
    info!(
        credential = config.api_key.is_some(),
        catalog_path = ?config.catalog_path,
        "configuration loaded"
    );

    let catalog = Arc::new(config.load_catalog()?);
    info!(
        tutorials = catalog.len(),
        categories = catalog.categories().len(),
        "catalog loaded"
    );

    let gemini_config = GeminiClientConfig::from_env();
    info!(
        model = %gemini_config.model,
        base_url = %gemini_config.base_url,
        "gemini client configured"
    );
    let gateway = GeminiGateway::new(GeminiClient::new(gemini_config)?, config.api_key.clone());
    if !gateway.has_credential() {
        info!("no API key configured, tutor replies will explain how to set one");
    }

    let server = TutorialsServer::new(catalog, Arc::new(gateway));

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
