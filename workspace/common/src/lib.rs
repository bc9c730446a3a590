//! Record schemas and transport shapes shared by the storage layer and the
//! HTTP handlers.
//!
//! Incoming payloads are untyped JSON. Each record type knows how to turn such
//! a payload into a validated value ([`Record::from_payload`]) and how to flatten
//! itself back into the field mapping that gets stored as a document.

pub mod converters;
pub mod records;
mod validation;

pub use converters::{INTERNAL_ID_FIELD, PUBLIC_ID_FIELD, to_transport, to_transport_all};
pub use records::{Budget, Category, Expense, Record};
pub use validation::{FieldViolation, ValidationFailure};
