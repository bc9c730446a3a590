use anyhow::Result;
use tracing::{error, info, trace};

use crate::config::connect_database;

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    match connect_database(database_url).await {
        Ok(_) => {
            info!("Database initialization completed successfully!");
            Ok(())
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            Err(e)
        }
    }
}
