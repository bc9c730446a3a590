use crate::records::Record;
use crate::validation::{FieldReader, ValidationFailure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// A single expense.
///
/// `category` refers to a [`Category`](crate::Category) by name, but the
/// reference is never checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    /// Short description, e.g. "Coffee at the station"
    pub title: String,
    /// Positive amount in the user's currency
    #[schema(example = 4.5)]
    pub amount: f64,
    /// Category name
    #[schema(example = "Groceries")]
    pub category: String,
    /// When the expense occurred (defaults to the time it was recorded)
    pub date: DateTime<Utc>,
    /// Optional free-form notes
    pub notes: Option<String>,
}

#[derive(Debug, Default, Validate)]
struct ExpenseDraft {
    #[validate(required(message = "field required"))]
    title: Option<String>,
    #[validate(
        required(message = "field required"),
        range(exclusive_min = 0.0, message = "must be greater than 0")
    )]
    amount: Option<f64>,
    #[validate(required(message = "field required"))]
    category: Option<String>,
    date: Option<DateTime<Utc>>,
    notes: Option<String>,
}

impl Record for Expense {
    const PARTITION: &'static str = "expense";

    fn from_payload(payload: &Value) -> Result<Self, ValidationFailure> {
        let mut reader = FieldReader::new(payload)?;
        let draft = ExpenseDraft {
            title: reader.string("title"),
            amount: reader.number("amount"),
            category: reader.string("category"),
            date: reader.timestamp("date"),
            notes: reader.string("notes"),
        };
        reader.finish(draft.validate())?;

        // presence of the required fields is checked by `required`
        Ok(Self {
            title: draft.title.unwrap_or_default(),
            amount: draft.amount.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            date: draft.date.unwrap_or_else(Utc::now),
            notes: draft.notes,
        })
    }
}
