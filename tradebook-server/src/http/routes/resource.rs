//! CRUD endpoints shared by every entity
//!
//! One generic handler set, instantiated per repository:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/<collection>` | 200, JSON array |
//! | POST | `/<collection>` | 201, `Location` header |
//! | GET | `/<collection>/{id}` | 200, JSON object |
//! | PATCH | `/<collection>/{id}` | 204 |
//! | DELETE | `/<collection>/{id}` | 204 |

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::Span;

use crate::db::Repository;
use crate::http::error::ApiError;
use crate::http::extractors::{ItemKey, JsonBody};
use crate::models::{Keyed, Validate};

/// Handler state for one collection
pub struct Resource<R> {
    repo: Arc<R>,
    collection: &'static str,
    span: Span,
}

/// Serialize `body` explicitly so an encoding failure maps to 500 JSON.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body)?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response())
}

/// GET /<collection>/{id}
async fn find_one<R>(
    State(res): State<Arc<Resource<R>>>,
    ItemKey(key): ItemKey,
) -> Result<Response, ApiError>
where
    R: Repository,
    R::View: Serialize,
{
    tracing::info!(parent: &res.span, key, "get one");
    let view = res.repo.find_one(key).await?;
    json_response(StatusCode::OK, &view)
}

/// GET /<collection>
async fn find_all<R>(State(res): State<Arc<Resource<R>>>) -> Result<Response, ApiError>
where
    R: Repository,
    R::View: Serialize,
{
    tracing::info!(parent: &res.span, "get all");
    let views = res.repo.find_all().await?;
    json_response(StatusCode::OK, &views)
}

/// POST /<collection>
async fn create<R>(
    State(res): State<Arc<Resource<R>>>,
    JsonBody(mut record): JsonBody<R::Record>,
) -> Result<Response, ApiError>
where
    R: Repository,
    R::Record: DeserializeOwned + Validate,
{
    tracing::info!(parent: &res.span, "create");
    record.validate()?;

    let key = res.repo.create(&mut record).await?;
    let location = format!("{}/{}", res.collection, key);

    Ok((
        StatusCode::CREATED,
        [
            (header::LOCATION, location),
            (header::CONTENT_TYPE, "application/json".to_string()),
        ],
    )
        .into_response())
}

/// PATCH /<collection>/{id}
///
/// The key in the path always replaces any key present in the body.
async fn update<R>(
    State(res): State<Arc<Resource<R>>>,
    ItemKey(key): ItemKey,
    JsonBody(mut patch): JsonBody<R::Patch>,
) -> Result<Response, ApiError>
where
    R: Repository,
    R::Patch: DeserializeOwned + Validate + Keyed,
{
    tracing::info!(parent: &res.span, key, "update");
    patch.validate()?;
    patch.set_key(key);

    res.repo.update(patch).await?;
    Ok((StatusCode::NO_CONTENT, [(header::CONTENT_TYPE, "application/json")]).into_response())
}

/// DELETE /<collection>/{id}
async fn delete<R>(
    State(res): State<Arc<Resource<R>>>,
    ItemKey(key): ItemKey,
) -> Result<Response, ApiError>
where
    R: Repository,
{
    tracing::info!(parent: &res.span, key, "delete");
    res.repo.delete(key).await?;
    Ok((StatusCode::NO_CONTENT, [(header::CONTENT_TYPE, "application/json")]).into_response())
}

/// Routes for one collection.
///
/// `<collection>/` is registered next to `<collection>/{id}` so an empty
/// key reaches the handlers and is rejected as 400, not routed to 404.
pub fn router<R>(collection: &'static str, repo: Arc<R>, span: Span) -> Router
where
    R: Repository,
    R::Record: DeserializeOwned + Validate,
    R::Patch: DeserializeOwned + Validate + Keyed,
    R::View: Serialize,
{
    let state = Arc::new(Resource {
        repo,
        collection,
        span,
    });

    let item = format!("{collection}/{{id}}");
    let bare = format!("{collection}/");

    Router::new()
        .route(collection, get(find_all::<R>).post(create::<R>))
        .route(
            &item,
            get(find_one::<R>).patch(update::<R>).delete(delete::<R>),
        )
        .route(
            &bare,
            get(find_one::<R>).patch(update::<R>).delete(delete::<R>),
        )
        .with_state(state)
}
