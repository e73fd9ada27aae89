use std::sync::Arc;

use models::{Location, LocationRef};
use tracing::{debug, instrument, warn};

use crate::cache::EntityCache;
use crate::database_service::DatabaseService;
use crate::errors::ServiceError;
use crate::locations::name::NameResolution;
use crate::locations::schema::{location_key, LocationCodec, LocationDocument, LOCATION_KEY_PREFIX};
use crate::store::{DocumentStore, KeyRange};

/// Service for retrieving location information.
///
/// The cache is keyed by bare id; the store by `location::<id>`.
pub struct LocationsService {
    db: DatabaseService<Location, LocationDocument>,
    cache: EntityCache<Location>,
}

impl LocationsService {
    pub fn new(store: Arc<dyn DocumentStore>, cache: EntityCache<Location>) -> Self {
        Self { db: DatabaseService::new(store, Arc::new(LocationCodec)), cache }
    }

    /// Retrieves a location by its bare id.
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<Location, ServiceError> {
        if let Some(location) = self.cache.get(id).await {
            return Ok(location);
        }
        let location = self.db.get_one(&location_key(id)).await?;
        self.cache.insert(id.to_string(), location.clone()).await;
        Ok(location)
    }

    /// Retrieves all available locations, ordered by id.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Location>, ServiceError> {
        self.db.get_all(Some(KeyRange::prefix(LOCATION_KEY_PREFIX))).await
    }

    /// Writes `location` under bare id `id`. The stored `_id` always follows
    /// `id`, whatever `location.id` says. The cache is left untouched.
    #[instrument(skip(self, location))]
    pub async fn update_one(&self, id: &str, location: &Location) -> Result<(), ServiceError> {
        if location.id == id {
            self.db.update_one(&location_key(id), location).await?;
        } else {
            debug!(entity_id = %location.id, "entity id differs from key; storing under key");
            let keyed = Location { id: id.to_string(), name: location.name.clone() };
            self.db.update_one(&location_key(id), &keyed).await?;
        }
        debug!("location stored");
        Ok(())
    }

    /// Display name for a location reference, with the reason when the
    /// referenced location could not be loaded.
    ///
    /// Never fails. A loaded location answers with its own name in `lang`,
    /// which may be absent. Without an id, or when the lookup fails, the
    /// reference's own name (else its id) is returned as a fallback.
    pub async fn resolve_name(&self, location: Option<&LocationRef>, lang: &str) -> NameResolution {
        let fallback = location.and_then(|r| r.name().or_else(|| r.id())).map(str::to_string);
        let Some(id) = location.and_then(LocationRef::id) else {
            return NameResolution::Fallback { value: fallback, cause: None };
        };

        match self.get_one(id).await {
            Ok(found) => {
                let name = found.get_name(lang).map(str::to_string);
                if name.is_none() {
                    debug!(location_id = id, lang, "location has no name in requested language");
                }
                NameResolution::Resolved(name)
            }
            Err(cause) => NameResolution::Fallback { value: fallback, cause: Some(cause) },
        }
    }

    /// Display name for a location reference; lookup failures are logged
    /// and replaced by the fallback value.
    pub async fn get_name(&self, location: Option<&LocationRef>, lang: &str) -> Option<String> {
        let resolution = self.resolve_name(location, lang).await;
        if let Some(cause) = resolution.cause() {
            warn!(
                location_id = location.and_then(LocationRef::id).unwrap_or_default(),
                error = %cause,
                "no location found for id; using fallback name"
            );
        }
        resolution.into_value()
    }

    pub fn cache(&self) -> &EntityCache<Location> { &self.cache }
}
