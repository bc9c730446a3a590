use common::INTERNAL_ID_FIELD;
use sea_orm::entity::prelude::*;
use serde_json::Map;

/// One stored record.
///
/// `fields` holds the record's serialized field mapping; the table itself
/// knows nothing about record shapes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Record type name the document belongs to, e.g. `expense`.
    pub partition: String,
    pub fields: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Field mapping of the document with its identifier under
    /// [`INTERNAL_ID_FIELD`].
    pub fn into_document(self) -> Map<String, Json> {
        let mut document = match self.fields {
            Json::Object(fields) => fields,
            // only objects are ever written
            _ => Map::new(),
        };
        document.insert(INTERNAL_ID_FIELD.to_string(), Json::from(self.id));
        document
    }

    /// True when every filter entry equals the document field of the same
    /// name.
    pub fn matches(&self, filter: &Map<String, Json>) -> bool {
        filter
            .iter()
            .all(|(field, expected)| self.fields.get(field) == Some(expected))
    }
}
