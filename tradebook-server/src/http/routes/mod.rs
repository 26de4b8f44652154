//! Route table

pub mod health;
pub mod resource;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Uri};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::db::{
    BuyerRepository, NoteRepository, ProductListRepository, ProductRepository, StorageClient,
};
use crate::http::error::ApiError;

pub const PRODUCTS: &str = "/products";
pub const BUYERS: &str = "/buyers";
pub const NOTES: &str = "/notes";
pub const PRODUCT_LISTS: &str = "/prdlists";

/// Every entity route backed by PostgreSQL repositories.
pub fn build_router(client: &StorageClient) -> Router {
    let products = ProductRepository::new(
        client.clone(),
        tracing::info_span!("repository", table = "product"),
    );
    let buyers = BuyerRepository::new(
        client.clone(),
        tracing::info_span!("repository", table = "buyer"),
    );
    let notes = NoteRepository::new(
        client.clone(),
        tracing::info_span!("repository", table = "note"),
    );
    let product_lists = ProductListRepository::new(
        client.clone(),
        tracing::info_span!("repository", table = "product_list"),
    );

    tracing::info!("registering product, buyer, note and product list routes");

    let resources = Router::new()
        .merge(resource::router(
            PRODUCTS,
            Arc::new(products),
            tracing::info_span!("handler", resource = "products"),
        ))
        .merge(resource::router(
            BUYERS,
            Arc::new(buyers),
            tracing::info_span!("handler", resource = "buyers"),
        ))
        .merge(resource::router(
            NOTES,
            Arc::new(notes),
            tracing::info_span!("handler", resource = "notes"),
        ))
        .merge(resource::router(
            PRODUCT_LISTS,
            Arc::new(product_lists),
            tracing::info_span!("handler", resource = "prdlists"),
        ));

    json_api(resources)
}

/// Add the health probe, the JSON 404 and 405 fallbacks and the JSON content type
/// to a set of resource routes.
pub fn json_api(resources: Router) -> Router {
    resources
        .merge(health::router())
        .fallback(unknown_route)
        .method_not_allowed_fallback(unsupported_method)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: format!("no route for {}", uri.path()),
    }
}

async fn unsupported_method() -> ApiError {
    ApiError::MethodNotAllowed
}
