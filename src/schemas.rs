use common::{Budget, Category, Expense, FieldViolation};
use model::DocumentStore;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Document store
    pub store: DocumentStore,
    /// What is known about the configured database, for diagnostics
    pub database: DatabaseInfo,
}

/// Connection string facts that are safe to report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseInfo {
    /// Whether `DATABASE_URL` was provided
    pub url_set: bool,
    /// Database name taken from the last path segment of the URL
    pub name: Option<String>,
}

impl DatabaseInfo {
    pub fn from_url(url: Option<&str>) -> Self {
        let name = url.and_then(|url| {
            let (scheme, rest) = url.split_once("://")?;
            let path = rest.split('?').next().unwrap_or(rest);
            let name = match path.rsplit_once('/') {
                Some((_, name)) => name,
                // sqlite://expenses.db names a file relative to the working directory
                None if scheme.starts_with("sqlite") => path,
                None => return None,
            };
            (!name.is_empty()).then(|| name.to_string())
        });

        Self {
            url_set: url.is_some(),
            name,
        }
    }
}

/// Response for record creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// Identifier of the stored record
    #[schema(example = "1")]
    pub id: String,
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub detail: String,
    /// Error code
    pub code: String,
    /// Field-level details, present for validation errors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

/// Storage diagnostic response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticResponse {
    /// Backend status
    pub backend: String,
    /// Database status, including a shortened error when one occurred
    pub database: String,
    /// Whether `DATABASE_URL` is set
    pub database_url: String,
    /// Database name, when connected
    pub database_name: Option<String>,
    /// "Connected" or "Not Connected"
    pub connection_status: String,
    /// Whether the database answered
    pub connected: bool,
    /// Up to 10 partition names
    pub collections: Vec<String>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::root,
        crate::handlers::health::diagnostics,
        crate::handlers::categories::create_category,
        crate::handlers::categories::list_categories,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::list_expenses,
        crate::handlers::budgets::create_budget,
        crate::handlers::budgets::list_budgets,
    ),
    components(
        schemas(
            Category,
            Expense,
            Budget,
            CreatedResponse,
            MessageResponse,
            ErrorResponse,
            FieldViolation,
            DiagnosticResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and storage diagnostics"),
        (name = "categories", description = "Expense categories"),
        (name = "expenses", description = "Recorded expenses"),
        (name = "budgets", description = "Per-category budgets"),
    ),
    info(
        title = "Expense Tracker API",
        description = "Create and list categories, expenses and budgets",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
