//! Request extractors with crate-specific rejections.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use super::error::AppError;
use crate::api::CustomerId;

/// JSON request body.
///
/// Unlike `axum::Json` this does not require a `Content-Type` header, and
/// every syntax or shape error is a `400 Bad Request` with an `ApiError`
/// body. Buffering failures (e.g. over the body limit) keep axum's status.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            AppError::BadRequest(format!("Invalid JSON body: {}", e)).into_response()
        })
    }
}

/// Parse the `{id}` path segment.
///
/// Only a plain decimal integer with an optional leading `-` is accepted;
/// surrounding whitespace and a leading `+` are rejected.
pub fn parse_customer_id(raw: &str) -> Result<CustomerId, AppError> {
    let invalid = || AppError::BadRequest(format!("Invalid customer id: {}", raw));
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i64>().map(CustomerId::new).map_err(|_| invalid())
}
