//! Repository error types
//!
//! PostgreSQL errors carrying server diagnostics are flattened into a
//! single descriptive message; everything else passes through.

use sqlx::error::DatabaseError;
use sqlx::postgres::PgDatabaseError;

/// Diagnostic fields reported by the PostgreSQL server
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("SQL Error: {message}, Detail: {detail}, Where: {location}, Code: {code}, SQLState: {sql_state}")]
pub struct StorageError {
    pub message: String,
    pub detail: String,
    pub location: String,
    pub code: String,
    pub sql_state: String,
}

impl StorageError {
    /// Extract diagnostics when the driver error came from PostgreSQL.
    pub fn from_database(err: &(dyn DatabaseError + 'static)) -> Option<Self> {
        let pg = err.try_downcast_ref::<PgDatabaseError>()?;

        Some(Self {
            message: pg.message().to_owned(),
            detail: pg.detail().unwrap_or_default().to_owned(),
            location: pg.r#where().unwrap_or_default().to_owned(),
            code: pg.code().to_owned(),
            sql_state: err.code().map(|c| c.into_owned()).unwrap_or_default(),
        })
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A keyed read matched nothing
    #[error("no rows in result set")]
    NotFound,

    /// An update or delete matched zero rows (or more than one)
    #[error("no row found to {op}")]
    NoRowAffected { op: &'static str },

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if let Some(storage) = StorageError::from_database(db.as_ref()) {
                return Self::Storage(storage);
            }
        }

        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Sqlx(other),
        }
    }
}
