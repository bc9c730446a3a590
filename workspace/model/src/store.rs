use crate::entities::document;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Rows fetched per round trip when a filter has to be applied.
const SCAN_PAGE_SIZE: u64 = 200;

/// A stored document: the record's fields plus its identifier under
/// [`common::INTERNAL_ID_FIELD`].
pub type Document = Map<String, Value>;

/// Error types for the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No database connection is available
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Clone, Debug)]
enum Backend {
    Connected(DatabaseConnection),
    Unavailable(String),
}

/// Insert and query documents grouped into named partitions.
///
/// Cloning is cheap: clones share the same connection pool. A store created
/// with [`DocumentStore::unavailable`] fails every operation with
/// [`StoreError::Unavailable`].
#[derive(Clone, Debug)]
pub struct DocumentStore {
    backend: Backend,
}

impl DocumentStore {
    pub fn connected(db: DatabaseConnection) -> Self {
        Self {
            backend: Backend::Connected(db),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    /// Whether a database connection was established at startup.
    pub fn is_connected(&self) -> bool {
        matches!(self.backend, Backend::Connected(_))
    }

    fn connection(&self) -> Result<&DatabaseConnection, StoreError> {
        match &self.backend {
            Backend::Connected(db) => Ok(db),
            Backend::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    /// Round trip to the database.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.connection()?.ping().await?;
        Ok(())
    }

    /// Stores `fields` as a new document in `partition` and returns the
    /// generated identifier.
    #[instrument(skip(self, fields))]
    pub async fn insert(
        &self,
        partition: &str,
        fields: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let db = self.connection()?;

        let row = document::ActiveModel {
            partition: Set(partition.to_string()),
            fields: Set(Value::Object(fields)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Inserted document {} into partition '{}'", row.id, partition);
        Ok(row.id.to_string())
    }

    /// Documents of `partition` in insertion order whose fields equal every
    /// entry of `filter`. An empty filter matches everything; `None` means no
    /// limit.
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        partition: &str,
        filter: &Map<String, Value>,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError> {
        let db = self.connection()?;

        let query = document::Entity::find()
            .filter(document::Column::Partition.eq(partition))
            .order_by_asc(document::Column::Id);

        if filter.is_empty() {
            let query = match limit {
                Some(max) => query.limit(max),
                None => query,
            };
            let rows = query.all(db).await?;
            debug!("Found {} documents in partition '{}'", rows.len(), partition);
            return Ok(rows.into_iter().map(document::Model::into_document).collect());
        }

        // field values live inside the JSON column, so matching happens here
        let mut documents = Vec::new();
        let mut pages = query.paginate(db, SCAN_PAGE_SIZE);
        while let Some(rows) = pages.fetch_and_next().await? {
            trace!("Scanning {} rows of partition '{}'", rows.len(), partition);
            for row in rows {
                if limit.is_some_and(|max| documents.len() as u64 >= max) {
                    break;
                }
                if row.matches(filter) {
                    documents.push(row.into_document());
                }
            }
            if limit.is_some_and(|max| documents.len() as u64 >= max) {
                break;
            }
        }

        debug!(
            "Found {} matching documents in partition '{}'",
            documents.len(),
            partition
        );
        Ok(documents)
    }

    /// Up to `max` distinct partition names, sorted.
    #[instrument(skip(self))]
    pub async fn partitions(&self, max: u64) -> Result<Vec<String>, StoreError> {
        let db = self.connection()?;

        let names: Vec<String> = document::Entity::find()
            .select_only()
            .column(document::Column::Partition)
            .distinct()
            .order_by_asc(document::Column::Partition)
            .limit(max)
            .into_tuple()
            .all(db)
            .await?;

        Ok(names)
    }
}
