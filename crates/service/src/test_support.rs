#![cfg(test)]
use configs::{StoreBackend, StoreConfig};
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory SQLite database; every call gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = StoreConfig {
        backend: StoreBackend::Database,
        url: "sqlite::memory:".to_string(),
        ..StoreConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
