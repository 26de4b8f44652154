//! HTTP server layer
//!
//! Axum server with:
//! - Generic CRUD routes per entity
//! - Request tracing and timeout
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_app, run_server, ServerConfig, ServerError};
