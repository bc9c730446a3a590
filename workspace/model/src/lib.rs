//! Document storage for the expense tracker.
//!
//! Records of every type are kept in one `documents` table, partitioned by
//! record type name. [`DocumentStore`] is the only way the rest of the
//! application talks to the database.

pub mod entities;
pub mod store;

pub use store::{Document, DocumentStore, StoreError};
