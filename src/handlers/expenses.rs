use crate::error::ApiError;
use crate::handlers::{create_record, list_records};
use crate::schemas::{AppState, CreatedResponse, ErrorResponse};
use axum::{
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use axum_valid::{Valid, ValidRejection};
use common::Expense;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Number of expenses returned when no limit is given
pub const DEFAULT_EXPENSE_LIMIT: u64 = 50;

/// Query parameters for listing expenses
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ExpenseListQuery {
    /// Only return expenses of exactly this category (empty means all)
    pub category: Option<String>,
    /// Maximum number of expenses (default: 50)
    #[validate(range(min = 1))]
    pub limit: Option<u64>,
}

impl ExpenseListQuery {
    fn filter(&self) -> Map<String, Value> {
        let mut filter = Map::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            filter.insert("category".to_string(), Value::String(category.to_string()));
        }
        filter
    }
}

/// Create a new expense
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = Expense,
    responses(
        (status = 201, description = "Expense created successfully", body = CreatedResponse),
        (status = 422, description = "Invalid expense fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    create_record::<Expense>(&state, payload).await
}

/// List expenses, optionally of one category
#[utoipa::path(
    get,
    path = "/api/expenses",
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Expenses in insertion order", body = [Expense]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, query))]
pub async fn list_expenses(
    State(state): State<AppState>,
    query: Result<Valid<Query<ExpenseListQuery>>, ValidRejection<QueryRejection>>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let Valid(Query(query)) = query
        .map_err(ApiError::from)
        .inspect_err(|e| warn!("Rejected expense query: {}", e))?;
    let limit = query.limit.unwrap_or(DEFAULT_EXPENSE_LIMIT);
    list_records::<Expense>(&state, query.filter(), Some(limit)).await
}
