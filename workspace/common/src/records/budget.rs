use crate::records::Record;
use crate::validation::{FieldReader, ValidationFailure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Budget period used when none is given.
pub const DEFAULT_PERIOD: &str = "monthly";

/// A spending limit for one category over a period.
///
/// By convention `period` is one of daily, weekly, monthly, quarterly or
/// yearly; other values are stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    /// Category this budget applies to
    #[schema(example = "Rent")]
    pub category: String,
    /// Spending limit for the period
    #[schema(example = 500.0)]
    pub limit: f64,
    /// Budget period
    #[schema(example = "monthly")]
    pub period: String,
}

#[derive(Debug, Default, Validate)]
struct BudgetDraft {
    #[validate(required(message = "field required"))]
    category: Option<String>,
    #[validate(
        required(message = "field required"),
        range(exclusive_min = 0.0, message = "must be greater than 0")
    )]
    limit: Option<f64>,
    period: Option<String>,
}

impl Record for Budget {
    const PARTITION: &'static str = "budget";

    fn from_payload(payload: &Value) -> Result<Self, ValidationFailure> {
        let mut reader = FieldReader::new(payload)?;
        let draft = BudgetDraft {
            category: reader.string("category"),
            limit: reader.number("limit"),
            period: reader.string("period"),
        };
        reader.finish(draft.validate())?;

        Ok(Self {
            category: draft.category.unwrap_or_default(),
            limit: draft.limit.unwrap_or_default(),
            period: draft.period.unwrap_or_else(|| DEFAULT_PERIOD.to_string()),
        })
    }
}
