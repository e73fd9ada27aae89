//! Repository services over a document store.
//! - `store`: key-ordered JSON document stores (file/memory and sea-orm backed).
//! - `database_service`: typed get/scan/update through an entity codec.
//! - `inbox_tracks`, `locations`: per-entity services with read-through caches.

pub mod cache;
pub mod codec;
pub mod database_service;
pub mod errors;
pub mod inbox_tracks;
pub mod locations;
pub mod runtime;
pub mod store;
#[cfg(test)]
pub mod test_support;

pub use database_service::DatabaseService;
pub use errors::ServiceError;
