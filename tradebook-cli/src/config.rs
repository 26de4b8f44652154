//! Service configuration file
//!
//! Read from `~/.tradebook/config.toml` unless `--config` names another
//! file. A missing file yields the defaults; a file that exists but does
//! not parse is an error.

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tradebook_server::{ServerConfig, StorageConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub listen: ListenConfig,
    pub storage: StorageSection,
}

/// `[listen]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub bind_ip: IpAddr,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub retry_delay_secs: u64,
}

impl Default for StorageSection {
    fn default() -> Self {
        let storage = StorageConfig::default();
        Self {
            host: storage.host,
            port: storage.port,
            database: storage.database,
            username: storage.username,
            password: storage.password,
            max_connections: storage.max_connections,
            connect_attempts: storage.connect_attempts,
            retry_delay_secs: storage.retry_delay.as_secs(),
        }
    }
}

impl AppConfig {
    /// Default config path: ~/.tradebook/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tradebook")
            .join("config.toml")
    }

    /// Load from `path`, or from the default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// Storage settings; `database_url` wins over the `[storage]` fields.
    pub fn storage_config(&self, database_url: Option<String>) -> StorageConfig {
        let s = &self.storage;
        StorageConfig {
            host: s.host.clone(),
            port: s.port,
            database: s.database.clone(),
            username: s.username.clone(),
            password: s.password.clone(),
            url: database_url,
            max_connections: s.max_connections,
            connect_attempts: s.connect_attempts,
            retry_delay: Duration::from_secs(s.retry_delay_secs),
        }
    }

    pub fn server_config(&self, bind: Option<SocketAddr>, cors_permissive: bool) -> ServerConfig {
        ServerConfig {
            bind_addr: bind.unwrap_or(SocketAddr::new(self.listen.bind_ip, self.listen.port)),
            cors_permissive,
            ..ServerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listen.port, 8080);
        assert_eq!(config.storage.retry_delay_secs, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[listen]
port = 9090

[storage]
host = "db.internal"
database = "shop"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.listen.port, 9090);
        assert_eq!(config.listen.bind_ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.storage.host, "db.internal");
        assert_eq!(config.storage.database, "shop");
        assert_eq!(config.storage.port, 5432);
        assert_eq!(config.storage.max_connections, 5);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[listen\nport = ").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn database_url_overrides_storage_section() {
        let config = AppConfig::default();

        let storage = config.storage_config(Some("postgres://u:p@remote/db".into()));
        assert_eq!(storage.url.as_deref(), Some("postgres://u:p@remote/db"));

        let storage = config.storage_config(None);
        assert!(storage.url.is_none());
        assert_eq!(storage.retry_delay, Duration::from_secs(5));
    }

    #[test]
    fn bind_flag_overrides_listen_section() {
        let config = AppConfig::default();

        let server = config.server_config(None, false);
        assert_eq!(server.bind_addr, "127.0.0.1:8080".parse().unwrap());

        let bind: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        let server = config.server_config(Some(bind), true);
        assert_eq!(server.bind_addr, bind);
        assert!(server.cors_permissive);
    }
}
