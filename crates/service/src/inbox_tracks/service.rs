use std::sync::Arc;

use models::InboxTrack;
use tracing::{debug, instrument};

use crate::cache::EntityCache;
use crate::database_service::DatabaseService;
use crate::errors::ServiceError;
use crate::inbox_tracks::schema::{InboxTrackCodec, InboxTrackDocument};
use crate::store::DocumentStore;

/// Inbox tracks stored under their `_id`, with a read-through cache.
///
/// Only `get_one` fills the cache. Writes go straight to the store and leave
/// any cached copy as it was, so `get_one` may keep returning the value it
/// first read.
pub struct InboxTracksService {
    db: DatabaseService<InboxTrack, InboxTrackDocument>,
    cache: EntityCache<InboxTrack>,
}

impl InboxTracksService {
    pub fn new(store: Arc<dyn DocumentStore>, cache: EntityCache<InboxTrack>) -> Self {
        Self { db: DatabaseService::new(store, Arc::new(InboxTrackCodec)), cache }
    }

    /// Retrieves an inbox track by its id.
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<InboxTrack, ServiceError> {
        if let Some(track) = self.cache.get(id).await {
            return Ok(track);
        }
        let track = self.db.get_one(id).await?;
        self.cache.insert(id.to_string(), track.clone()).await;
        Ok(track)
    }

    /// Retrieves all inbox tracks.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<InboxTrack>, ServiceError> {
        self.db.get_all(None).await
    }

    /// Retrieves the tracks for `ids` in request order; unknown ids are skipped.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<InboxTrack>, ServiceError> {
        self.db.get_many(ids).await
    }

    /// Writes `item` at `id`. The cache is left untouched.
    #[instrument(skip(self, item), fields(status = ?item.status))]
    pub async fn update_one(&self, id: &str, item: &InboxTrack) -> Result<(), ServiceError> {
        self.db.update_one(id, item).await?;
        debug!("inbox track stored");
        Ok(())
    }

    pub fn cache(&self) -> &EntityCache<InboxTrack> { &self.cache }
}
