pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{Database, DatabaseConnection};
use tracing::info;

pub use repositories::SeaOrmRepositoryProvider;

const DEFAULT_URL: &str = "sqlite://./inspection.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./inspection.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_config_creates_file_on_demand() {
        let config = DatabaseConfig::sqlite("/tmp/inspection.db");
        assert_eq!(config.url, "sqlite:///tmp/inspection.db?mode=rwc");
        assert_eq!(DatabaseConfig::default().url, DEFAULT_URL);
    }
}
