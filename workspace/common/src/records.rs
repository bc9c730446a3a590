//! The three record types the tracker stores.

mod budget;
mod category;
mod expense;

pub use budget::{Budget, DEFAULT_PERIOD};
pub use category::{Category, DEFAULT_COLOR};
pub use expense::Expense;

use crate::validation::ValidationFailure;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::{Map, Value};

/// A validated record that can be persisted as a document.
pub trait Record: Serialize + Sized {
    /// Partition (collection) the documents of this record type live in.
    const PARTITION: &'static str;

    /// Validates an untyped payload, filling defaults for absent optional
    /// fields. Fails with every violated field at once.
    fn from_payload(payload: &Value) -> Result<Self, ValidationFailure>;

    /// Flattens the record into the field mapping stored as a document.
    fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            other => Err(serde_json::Error::custom(format!(
                "{} serialized to a non-object value: {other}",
                Self::PARTITION
            ))),
        }
    }
}
