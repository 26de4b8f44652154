//! Storage client - pooled PostgreSQL access
//!
//! Thin facade over `sqlx::PgPool` offering three primitives:
//! `query` (many rows), `query_row` (exactly one row) and `exec`
//! (rows affected). Statements are always parameterized.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool};

/// Default maximum connections for the pool.
/// Kept low for a single small API.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Pool construction attempts before startup fails.
const DEFAULT_CONNECT_ATTEMPTS: u32 = 3;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Connection parameters for the relational store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Full connection string; takes precedence over the discrete fields
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "tradebook".to_string(),
            username: "postgres".to_string(),
            password: String::new(),
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl StorageConfig {
    /// Build sqlx connect options from the URL or the discrete fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.username)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}

/// Run `op` up to `attempts` times, sleeping `delay` between failures.
///
/// Returns the last error once attempts are exhausted. Only used while
/// connecting at startup.
pub async fn with_attempts<T, E, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                tracing::warn!(attempt, attempts, error = %err, "storage connection failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Pooled client shared by every repository
#[derive(Debug, Clone)]
pub struct StorageClient {
    pool: PgPool,
}

impl StorageClient {
    /// Connect to PostgreSQL, retrying a bounded number of times.
    ///
    /// # Errors
    ///
    /// Returns the last connection error once `connect_attempts` is exhausted.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = StorageClient::connect(&StorageConfig::default()).await?;
    /// ```
    pub async fn connect(config: &StorageConfig) -> Result<Self, sqlx::Error> {
        let options = config.connect_options()?;

        let pool = with_attempts(config.connect_attempts, config.retry_delay, || {
            PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options.clone())
        })
        .await?;

        tracing::info!(max_connections = config.max_connections, "storage pool ready");
        Ok(Self { pool })
    }

    /// Wrap an already constructed pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetch every row produced by `sql`.
    pub async fn query<T>(&self, sql: &str, args: PgArguments) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        sqlx::query_as_with(sql, args).fetch_all(&self.pool).await
    }

    /// Fetch exactly one row; zero rows is `sqlx::Error::RowNotFound`.
    pub async fn query_row<T>(&self, sql: &str, args: PgArguments) -> Result<T, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        sqlx::query_as_with(sql, args).fetch_one(&self.pool).await
    }

    /// Execute a mutating statement and return the number of rows affected.
    pub async fn exec(&self, sql: &str, args: PgArguments) -> Result<u64, sqlx::Error> {
        let result = sqlx::query_with(sql, args).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
