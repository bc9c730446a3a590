use crate::error::ApiError;
use crate::handlers::{create_record, list_records};
use crate::schemas::{AppState, CreatedResponse, ErrorResponse};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use common::Budget;
use serde_json::{Map, Value};
use tracing::instrument;

/// Create a new budget
#[utoipa::path(
    post,
    path = "/api/budgets",
    request_body = Budget,
    responses(
        (status = 201, description = "Budget created successfully", body = CreatedResponse),
        (status = 422, description = "Invalid budget fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "budgets"
)]
#[instrument(skip(state))]
pub async fn create_budget(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    create_record::<Budget>(&state, payload).await
}

/// Get all budgets
#[utoipa::path(
    get,
    path = "/api/budgets",
    responses(
        (status = 200, description = "All budgets, each with its `id`", body = [Budget]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "budgets"
)]
#[instrument(skip(state))]
pub async fn list_budgets(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    list_records::<Budget>(&state, Map::new(), None).await
}
