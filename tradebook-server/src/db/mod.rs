//! Database layer - storage client, migrations and repositories
//!
//! # Design Principles
//!
//! - One shared pool behind `StorageClient`; repositories are stateless facades
//! - Parameterized statements only
//! - Update/delete must touch exactly one row
//! - No multi-statement transactions

pub mod client;
pub mod error;
pub mod migrations;
pub mod repos;

pub use client::{StorageClient, StorageConfig};
pub use error::{DbError, StorageError};
pub use repos::*;
