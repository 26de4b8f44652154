//! Generic single-table repository
//!
//! A `Table` supplies its SQL and argument mappings; `TableRepository`
//! runs them through the storage client and enforces the one-row contract
//! on update and delete.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow};
use tracing::Span;

use super::{DbError, Repository};
use crate::db::client::StorageClient;
use crate::models::Keyed;

/// Per-table SQL and field mappings.
///
/// Statement parameter conventions:
/// - `INSERT` binds `insert_args` and returns the generated key
/// - `SELECT_ONE` and `DELETE` bind the key as `$1`
/// - `UPDATE` binds `update_args`; the key comes last
pub trait Table: for<'r> FromRow<'r, PgRow> + Keyed + Send + Sync + Unpin + 'static {
    type Patch: Keyed + Send + Sync + 'static;

    /// Table name, used in log fields
    const NAME: &'static str;
    const INSERT: &'static str;
    const SELECT_ALL: &'static str;
    const SELECT_ONE: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;

    fn insert_args(&self) -> Result<PgArguments, BoxDynError>;

    fn update_args(patch: &Self::Patch) -> Result<PgArguments, BoxDynError>;
}

/// Arguments holding just a key.
pub fn key_args(key: i32) -> Result<PgArguments, BoxDynError> {
    let mut args = PgArguments::default();
    args.add(key)?;
    Ok(args)
}

/// Collapse a multi-line SQL literal onto one line for logging.
pub(crate) fn compact_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Repository over a single table
pub struct TableRepository<T> {
    client: StorageClient,
    span: Span,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> TableRepository<T> {
    pub fn new(client: StorageClient, span: Span) -> Self {
        Self {
            client,
            span,
            _table: PhantomData,
        }
    }

    fn trace(&self, sql: &str) {
        tracing::debug!(parent: &self.span, table = T::NAME, sql = %compact_sql(sql), "SQL query");
    }

    /// Log the error on the repository span and hand it back.
    fn fail(&self, err: impl Into<DbError>) -> DbError {
        let err = err.into();
        match &err {
            DbError::NotFound => {
                tracing::debug!(parent: &self.span, table = T::NAME, "{}", err);
            }
            _ => {
                tracing::error!(parent: &self.span, table = T::NAME, error = %err, "query failed");
            }
        }
        err
    }

    fn encode(&self, args: Result<PgArguments, BoxDynError>) -> Result<PgArguments, DbError> {
        args.map_err(|e| self.fail(sqlx::Error::Encode(e)))
    }

    fn expect_one(&self, affected: u64, op: &'static str) -> Result<(), DbError> {
        if affected != 1 {
            return Err(self.fail(DbError::NoRowAffected { op }));
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Table> Repository for TableRepository<T> {
    type Record = T;
    type Patch = T::Patch;
    type View = T;

    async fn create(&self, record: &mut T) -> Result<i32, DbError> {
        self.trace(T::INSERT);
        let args = self.encode(record.insert_args())?;

        let (key,): (i32,) = self
            .client
            .query_row(T::INSERT, args)
            .await
            .map_err(|e| self.fail(e))?;

        record.set_key(key);
        Ok(key)
    }

    async fn find_all(&self) -> Result<Vec<T>, DbError> {
        self.trace(T::SELECT_ALL);
        self.client
            .query(T::SELECT_ALL, PgArguments::default())
            .await
            .map_err(|e| self.fail(e))
    }

    async fn find_one(&self, key: i32) -> Result<T, DbError> {
        self.trace(T::SELECT_ONE);
        let args = self.encode(key_args(key))?;

        self.client
            .query_row(T::SELECT_ONE, args)
            .await
            .map_err(|e| self.fail(e))
    }

    async fn update(&self, patch: T::Patch) -> Result<(), DbError> {
        self.trace(T::UPDATE);
        let args = self.encode(T::update_args(&patch))?;

        let affected = self
            .client
            .exec(T::UPDATE, args)
            .await
            .map_err(|e| self.fail(e))?;

        self.expect_one(affected, "update")
    }

    async fn delete(&self, key: i32) -> Result<(), DbError> {
        self.trace(T::DELETE);
        let args = self.encode(key_args(key))?;

        let affected = self
            .client
            .exec(T::DELETE, args)
            .await
            .map_err(|e| self.fail(e))?;

        self.expect_one(affected, "delete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_sql_joins_lines() {
        let sql = r#"
            SELECT id, name
            FROM product
            WHERE id = $1
        "#;
        assert_eq!(compact_sql(sql), "SELECT id, name FROM product WHERE id = $1");
    }
}
