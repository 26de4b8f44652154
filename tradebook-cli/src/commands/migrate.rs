//! Schema command

use anyhow::{Context, Result};
use clap::Parser;

use tradebook_server::db::migrations;
use tradebook_server::StorageClient;

use super::StorageArgs;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}

/// Create the product, buyer, note and product_list tables if missing.
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let app_config = AppConfig::load(args.storage.config.as_deref())?;
    let storage = app_config.storage_config(args.storage.database_url);

    let client = StorageClient::connect(&storage)
        .await
        .context("Failed to connect to storage")?;

    migrations::run(client.pool())
        .await
        .context("Failed to apply schema")?;

    tracing::info!("schema is up to date");
    Ok(())
}
