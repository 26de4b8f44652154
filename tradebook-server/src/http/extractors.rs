//! Custom Axum extractors
//!
//! Both reject with `ApiError` so that malformed input gets the same JSON
//! 400 as every other failure.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, RawPathParams, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Integer key taken from the `{id}` path segment.
///
/// A missing or empty segment and a non-integer value are both 400.
pub struct ItemKey(pub i32);

impl<S> FromRequestParts<S> for ItemKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state).await.ok();
        let raw = params
            .as_ref()
            .and_then(|p| p.iter().find(|(name, _)| *name == "id"))
            .map(|(_, value)| value.to_owned())
            .unwrap_or_default();

        if raw.is_empty() {
            return Err(ApiError::bad_request("id path parameter is required"));
        }

        raw.parse::<i32>().map(Self).map_err(|_| {
            ApiError::bad_request(format!("id path parameter must be an integer, got '{raw}'"))
        })
    }
}

/// JSON body whose decode failure is a 400 "invalid data".
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::invalid_data())?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|_| ApiError::invalid_data())
    }
}
