#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Where records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local maps. Data is lost on restart.
    Memory,
    Postgres(DatabaseConfig),
}

impl StorageBackend {
    /// Interpret a `DATABASE_URL` value; `memory` selects the in-memory store.
    pub fn from_url(url: &str, max_connections: u32, min_connections: u32) -> Self {
        if url.eq_ignore_ascii_case("memory") || url.starts_with("memory://") {
            Self::Memory
        } else {
            Self::Postgres(DatabaseConfig {
                url: url.to_string(),
                max_connections,
                min_connections,
            })
        }
    }
}

/// Configuration for the PostgreSQL database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Open the connection pool.
#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(pool = config.max_connections, "Database connected");

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(StorageBackend::from_url("memory", 5, 1), StorageBackend::Memory);
        assert_eq!(
            StorageBackend::from_url("memory://dev", 5, 1),
            StorageBackend::Memory
        );
        assert_eq!(
            StorageBackend::from_url("postgres://u:p@localhost/blog", 5, 1),
            StorageBackend::Postgres(DatabaseConfig {
                url: "postgres://u:p@localhost/blog".to_string(),
                max_connections: 5,
                min_connections: 1,
            })
        );
    }
}
