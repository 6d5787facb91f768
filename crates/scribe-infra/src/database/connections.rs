#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the main database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection to the main database.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    /// Primary database - all repositories run against this pool.
    pub main: DbConn,
}

#[cfg(not(feature = "postgres"))]
pub struct DatabaseConnections;

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect to the configured database.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(&config.url);
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        tracing::info!(
            max_connections = config.max_connections,
            "Connecting to main database"
        );

        let main = Database::connect(options).await?;

        Ok(Self { main })
    }
}
