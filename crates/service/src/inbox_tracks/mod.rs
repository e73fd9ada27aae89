//! Inbox tracks repository: codec for stored track documents and a cached
//! service on top of [`DatabaseService`](crate::database_service::DatabaseService).

pub mod schema;
pub mod service;

pub use schema::{InboxTrackCodec, InboxTrackDocument};
pub use service::InboxTracksService;
