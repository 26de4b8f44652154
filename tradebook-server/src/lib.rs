//! tradebook-server: HTTP API over products, buyers, notes and their line items
//!
//! Requests flow router → handler → repository → storage client → PostgreSQL
//! and back. The four entities share one generic repository and one generic
//! handler set; notes add a composed read path that attaches priced line
//! items.

pub mod db;
pub mod http;
pub mod models;

pub use db::{StorageClient, StorageConfig};
pub use http::{run_server, ServerConfig};
