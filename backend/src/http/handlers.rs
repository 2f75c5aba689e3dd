//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! customer service layer.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use super::dto::{Customer, HealthResponse, UNMATCHED_IDS_HEADER};
use super::error::AppError;
use super::extract::{parse_customer_id, JsonBody};
use super::state::AppState;
use crate::db::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// =============================================================================
// Home & Health
// =============================================================================

/// GET /
///
/// Static welcome page listing the endpoints.
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo = state.repository.as_ref();
    let store = match services::health_check(repo).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let customers = services::count_customers(repo).await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
        customers,
    }))
}

// =============================================================================
// Customer CRUD
// =============================================================================

/// GET /customers
pub async fn list_customers(State(state): State<AppState>) -> HandlerResult<Vec<Customer>> {
    let customers = services::list_customers(state.repository.as_ref()).await?;
    Ok(Json(customers))
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Customer> {
    let id = parse_customer_id(&id)?;
    let customer = services::get_customer(state.repository.as_ref(), id).await?;
    Ok(Json(customer))
}

/// POST /customers
///
/// Any id in the body is ignored; the store assigns the next one.
pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(customer): JsonBody<Customer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let created = services::create_customer(state.repository.as_ref(), customer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /customers/{id}
///
/// Replaces every field of the customer; the id always comes from the path.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(customer): JsonBody<Customer>,
) -> HandlerResult<Customer> {
    let id = parse_customer_id(&id)?;
    let updated = services::update_customer(state.repository.as_ref(), id, customer).await?;
    Ok(Json(updated))
}

/// DELETE /customers/{id}
///
/// Responds with the customers that remain.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<Customer>> {
    let id = parse_customer_id(&id)?;
    let remaining = services::delete_customer(state.repository.as_ref(), id).await?;
    Ok(Json(remaining))
}

/// PUT /customers-batch
///
/// Responds with the whole collection. Ids that matched nothing are listed
/// in the `x-unmatched-customer-ids` header.
pub async fn update_customers_batch(
    State(state): State<AppState>,
    JsonBody(customers): JsonBody<Vec<Customer>>,
) -> Result<Response, AppError> {
    let outcome = services::batch_update_customers(state.repository.as_ref(), customers).await?;

    let mut response = Json(outcome.customers).into_response();
    if !outcome.skipped.is_empty() {
        let ids = outcome
            .skipped
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let value = HeaderValue::from_str(&ids)
            .map_err(|e| AppError::Internal(format!("Invalid header value: {}", e)))?;
        response.headers_mut().insert(UNMATCHED_IDS_HEADER, value);
    }
    Ok(response)
}
