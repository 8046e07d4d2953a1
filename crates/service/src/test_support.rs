#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate};

/// A private, migrated in-memory SQLite database for the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        acquire_timeout_secs: 10,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
