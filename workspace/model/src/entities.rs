//! SeaORM entities backing the document store.

pub mod document;
