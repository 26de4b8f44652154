//! HTTP server command
//!
//! Connects to storage (with retries), optionally applies the schema and
//! serves the JSON API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use tradebook_server::db::migrations;
use tradebook_server::{run_server, StorageClient};

use super::StorageArgs;
use crate::config::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Address to bind to (overrides the [listen] section)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Create missing tables before serving
    #[arg(long)]
    pub migrate: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let app_config = AppConfig::load(args.storage.config.as_deref())?;
    let storage = app_config.storage_config(args.storage.database_url);
    let server = app_config.server_config(args.bind, args.cors_permissive);

    let client = StorageClient::connect(&storage)
        .await
        .context("Failed to connect to storage")?;

    if args.migrate {
        migrations::run(client.pool())
            .await
            .context("Failed to apply schema")?;
    }

    tracing::info!("Starting tradebook server on {}", server.bind_addr);

    // Blocks until shutdown
    run_server(client, server).await.context("Server error")?;

    Ok(())
}
