use crate::records::Record;
use crate::validation::{FieldReader, ValidationFailure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Tag color used when a category is created without one.
pub const DEFAULT_COLOR: &str = "#6366F1";

/// A spending category, e.g. "Groceries" or "Rent".
///
/// Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Category name
    #[schema(example = "Groceries")]
    pub name: String,
    /// Hex color for UI tags
    #[schema(example = "#6366F1")]
    pub color: String,
}

#[derive(Debug, Default, Validate)]
struct CategoryDraft {
    #[validate(
        required(message = "field required"),
        length(min = 1, message = "must not be empty")
    )]
    name: Option<String>,
    color: Option<String>,
}

impl Record for Category {
    const PARTITION: &'static str = "category";

    fn from_payload(payload: &Value) -> Result<Self, ValidationFailure> {
        let mut reader = FieldReader::new(payload)?;
        let draft = CategoryDraft {
            name: reader.string("name"),
            color: reader.string("color"),
        };
        reader.finish(draft.validate())?;

        Ok(Self {
            // presence checked by `required`
            name: draft.name.unwrap_or_default(),
            color: draft.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        })
    }
}
