//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uniform create / find_all / find_one / update / delete contract
//! - Update and delete must affect exactly one row
//! - Errors are logged on the repository span, then returned

pub mod buyers;
pub mod notes;
pub mod product_lists;
pub mod products;
pub mod table;

use async_trait::async_trait;

pub use super::error::{DbError, StorageError};
pub use buyers::BuyerRepository;
pub use notes::NoteRepository;
pub use product_lists::ProductListRepository;
pub use products::ProductRepository;
pub use table::{Table, TableRepository};

/// Data access contract shared by every entity.
///
/// `Record` is what gets inserted, `Patch` what a partial update carries
/// and `View` what reads return. For most tables the view is the record
/// itself; notes return a composed view with line items.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    type Record: Send + 'static;
    type Patch: Send + 'static;
    type View: Send + 'static;

    /// Insert the record, store the generated key in it and return the key.
    async fn create(&self, record: &mut Self::Record) -> Result<i32, DbError>;

    /// Every row in key order; empty when the table is empty.
    async fn find_all(&self) -> Result<Vec<Self::View>, DbError>;

    /// Single row by key, `DbError::NotFound` when absent.
    async fn find_one(&self, key: i32) -> Result<Self::View, DbError>;

    /// Apply the patch to the row named by its key.
    async fn update(&self, patch: Self::Patch) -> Result<(), DbError>;

    async fn delete(&self, key: i32) -> Result<(), DbError>;
}
