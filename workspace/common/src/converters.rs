//! Conversion of stored documents into their transport representation.
//!
//! The storage layer hands documents back with the identifier it generated
//! under [`INTERNAL_ID_FIELD`]. Clients only ever see a string `id`.

use serde_json::{Map, Value};

/// Key under which the storage layer exposes a document's identifier.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Key under which the identifier is published to clients.
pub const PUBLIC_ID_FIELD: &str = "id";

/// Renames the internal identifier to `id` and stringifies its value.
///
/// All other fields pass through untouched. A document without an internal
/// identifier (including the empty document) is returned as-is.
pub fn to_transport(mut document: Map<String, Value>) -> Map<String, Value> {
    if let Some(id) = document.remove(INTERNAL_ID_FIELD) {
        let id = match id {
            Value::String(id) => id,
            other => other.to_string(),
        };
        document.insert(PUBLIC_ID_FIELD.to_string(), Value::String(id));
    }
    document
}

/// Applies [`to_transport`] to every document of a listing.
pub fn to_transport_all(documents: Vec<Map<String, Value>>) -> Vec<Map<String, Value>> {
    documents.into_iter().map(to_transport).collect()
}
