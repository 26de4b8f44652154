//! Command implementations for the tradebook CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use clap::Args;

/// Connection flags shared by every command that talks to storage
#[derive(Args, Debug)]
pub struct StorageArgs {
    /// Config file (default: ~/.tradebook/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<std::path::PathBuf>,

    /// Database URL (overrides the [storage] section)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}
