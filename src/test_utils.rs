use crate::router::create_router;
use crate::schemas::{AppState, DatabaseInfo};
use axum::Router;
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use model::DocumentStore;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect(TEST_DATABASE_URL)
        .await
        .expect("Failed to connect to in-memory database");

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// AppState backed by a fresh in-memory database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;

    AppState {
        store: DocumentStore::connected(db),
        database: DatabaseInfo::from_url(Some(TEST_DATABASE_URL)),
    }
}

/// AppState as it looks when DATABASE_URL was never set
pub fn setup_unconfigured_app_state() -> AppState {
    AppState {
        store: DocumentStore::unavailable("DATABASE_URL is not set"),
        database: DatabaseInfo::from_url(None),
    }
}

/// AppState whose connection pool has been closed underneath it, so every
/// storage call fails at the driver level
pub async fn setup_broken_app_state() -> AppState {
    let db = setup_test_db().await;
    let handle = db.clone();
    db.close().await.expect("Failed to close test database");

    AppState {
        store: DocumentStore::connected(handle),
        database: DatabaseInfo::from_url(Some("sqlite://expenses.db")),
    }
}

/// AppState on a live connection whose documents table has been dropped, so
/// pings succeed but every document query fails
pub async fn setup_app_state_without_documents() -> AppState {
    let db = setup_test_db().await;
    db.execute_unprepared("DROP TABLE documents")
        .await
        .expect("Failed to drop documents table");

    AppState {
        store: DocumentStore::connected(db),
        database: DatabaseInfo::from_url(Some(TEST_DATABASE_URL)),
    }
}

/// Initialize tracing for tests, captured per test by the test harness.
///
/// The log level is taken from RUST_LOG and defaults to WARN. Only the first
/// call installs the subscriber.
fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let _ = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_test_writer()
        .try_init();
}

/// Create axum app for testing
pub fn setup_test_app(state: AppState) -> Router {
    create_router(state, Duration::from_secs(30))
}

/// Test server over a fresh in-memory database
pub async fn setup_test_server() -> TestServer {
    server_for(setup_test_app_state().await)
}

/// Test server over the given state
pub fn server_for(state: AppState) -> TestServer {
    init_test_tracing();
    TestServer::new(setup_test_app(state)).expect("Failed to start test server")
}
