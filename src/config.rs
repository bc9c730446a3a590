use anyhow::Result;
use ::config::{Config, Environment};
use migration::{Migrator, MigratorTrait};
use model::DocumentStore;
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::schemas::{AppState, DatabaseInfo};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

/// Process configuration, read from defaults and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SeaORM connection string; storage is unavailable when unset
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from `DATABASE_URL`, `HOST`, `PORT` and
    /// `REQUEST_TIMEOUT_SECS`, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::default().try_parsing(true))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("request_timeout_secs", i64::from(DEFAULT_REQUEST_TIMEOUT_SECS))?
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Connect to the database and bring the documents table up to date.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    debug!("Database connection established");

    Migrator::up(&db, None).await?;
    debug!("Document schema is up to date");

    Ok(db)
}

/// Initialize application state.
///
/// A missing `DATABASE_URL` or a failed connection does not stop the
/// process: the store is marked unavailable and the storage endpoints
/// answer with a server error until the service is restarted.
pub async fn initialize_app_state(config: &AppConfig) -> AppState {
    let database = DatabaseInfo::from_url(config.database_url.as_deref());

    let store = match config.database_url.as_deref() {
        None => {
            warn!("DATABASE_URL is not set, storage endpoints will be unavailable");
            DocumentStore::unavailable("DATABASE_URL is not set")
        }
        Some(database_url) => {
            info!(
                "Connecting to database {}",
                database.name.as_deref().unwrap_or("<unnamed>")
            );
            match connect_database(database_url).await {
                Ok(db) => {
                    info!("Connected to database");
                    DocumentStore::connected(db)
                }
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    DocumentStore::unavailable(e.to_string())
                }
            }
        }
    };

    AppState { store, database }
}
