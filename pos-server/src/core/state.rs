use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use shared::AppError;

/// Shared application state
///
/// Holds the configuration and the SQLite connection pool. `Clone` is cheap:
/// the pool is internally reference-counted.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Open the database (running pending migrations) and build the state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool))
    }
}
