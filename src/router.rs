use crate::handlers::{
    budgets::{create_budget, list_budgets},
    categories::{create_category, list_categories},
    expenses::{create_expense, list_expenses},
    health::{diagnostics, root},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Liveness and diagnostics
        .route("/", get(root))
        .route("/test", get(diagnostics))
        // Record routes
        .route("/api/categories", post(create_category).get(list_categories))
        .route("/api/expenses", post(create_expense).get(list_expenses))
        .route("/api/budgets", post(create_budget).get(list_budgets))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
