//! Runtime wiring
//!
//! Opens the configured document collections and builds the repository
//! services on top of them, so binaries only deal with `AppConfig`.

use std::{path::Path, sync::Arc};

use configs::{AppConfig, StoreBackend, StoreConfig};
use migration::MigratorTrait;
use tracing::info;

use crate::cache::EntityCache;
use crate::inbox_tracks::InboxTracksService;
use crate::locations::LocationsService;
use crate::store::{DocumentStore, JsonDocumentStore, SeaOrmDocumentStore};

/// Collection holding inbox track documents keyed by their `_id`.
pub const INBOX_COLLECTION: &str = "inbox";
/// Collection holding library documents; kinds are told apart by key prefix.
pub const LIBRARY_COLLECTION: &str = "library";

/// One store per collection.
#[derive(Clone)]
pub struct Collections {
    pub inbox: Arc<dyn DocumentStore>,
    pub library: Arc<dyn DocumentStore>,
}

/// Open both collections on the backend selected by `cfg.backend`.
///
/// The database backend shares one connection pool and is migrated up
/// before use.
pub async fn open_collections(cfg: &StoreConfig) -> anyhow::Result<Collections> {
    let collections = match cfg.backend {
        StoreBackend::Memory => Collections {
            inbox: JsonDocumentStore::in_memory(),
            library: JsonDocumentStore::in_memory(),
        },
        StoreBackend::File => {
            common::env::ensure_data_dir(&cfg.dir).await?;
            let dir = Path::new(&cfg.dir);
            Collections {
                inbox: JsonDocumentStore::open(dir.join(format!("{INBOX_COLLECTION}.json"))).await?,
                library: JsonDocumentStore::open(dir.join(format!("{LIBRARY_COLLECTION}.json"))).await?,
            }
        }
        StoreBackend::Database => {
            let db = models::db::connect_with_config(cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Collections {
                inbox: Arc::new(SeaOrmDocumentStore::new(db.clone(), INBOX_COLLECTION)),
                library: Arc::new(SeaOrmDocumentStore::new(db, LIBRARY_COLLECTION)),
            }
        }
    };
    info!(backend = ?cfg.backend, "document collections ready");
    Ok(collections)
}

/// Repository services, each with its own cache.
#[derive(Clone)]
pub struct LibraryServices {
    pub inbox_tracks: Arc<InboxTracksService>,
    pub locations: Arc<LocationsService>,
}

impl LibraryServices {
    pub fn with_collections(collections: &Collections, cfg: &AppConfig) -> Self {
        Self {
            inbox_tracks: Arc::new(InboxTracksService::new(collections.inbox.clone(), EntityCache::new(&cfg.cache))),
            locations: Arc::new(LocationsService::new(collections.library.clone(), EntityCache::new(&cfg.cache))),
        }
    }

    pub async fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let collections = open_collections(&cfg.store).await?;
        Ok(Self::with_collections(&collections, cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{InboxTrack, Location};

    fn config(store: StoreConfig) -> AppConfig {
        AppConfig { store, ..AppConfig::default() }
    }

    #[tokio::test]
    async fn memory_backend_keeps_collections_apart() -> Result<(), anyhow::Error> {
        let cfg = config(StoreConfig { backend: StoreBackend::Memory, ..StoreConfig::default() });
        let services = LibraryServices::from_config(&cfg).await?;
        services.inbox_tracks.update_one("t1", &InboxTrack::new("t1", "upload", "Foo")).await?;
        services.locations.update_one("a", &Location::new("a").with_name("en", "Alpha")).await?;

        assert_eq!(services.inbox_tracks.get_all().await?.len(), 1);
        assert_eq!(services.locations.get_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn file_backend_writes_one_file_per_collection() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("library_runtime_{}", uuid::Uuid::new_v4()));
        let cfg = config(StoreConfig { backend: StoreBackend::File, dir: dir.display().to_string(), ..StoreConfig::default() });
        let services = LibraryServices::from_config(&cfg).await?;
        services.locations.update_one("a", &Location::new("a")).await?;

        assert!(tokio::fs::metadata(dir.join("inbox.json")).await.is_ok());
        let library = tokio::fs::read_to_string(dir.join("library.json")).await?;
        assert!(library.contains("location::a"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn sqlite_backend_is_migrated_on_open() -> Result<(), anyhow::Error> {
        let cfg = StoreConfig { backend: StoreBackend::Database, url: "sqlite::memory:".into(), ..StoreConfig::default() };
        let collections = open_collections(&cfg).await?;
        collections.library.put("location::a", serde_json::json!({ "_id": "location::a", "name": {} })).await?;
        assert!(collections.inbox.get("location::a").await?.is_none());
        assert!(collections.library.get("location::a").await?.is_some());
        Ok(())
    }
}
