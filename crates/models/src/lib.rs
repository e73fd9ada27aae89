//! Domain entities shared by the library services, plus the sea-orm
//! `document` table backing the database store.

pub mod db;
pub mod document;
pub mod inbox_track;
pub mod location;
pub mod normalized;

pub use inbox_track::{InboxTrack, TrackStatus};
pub use location::{Location, LocationRef};
pub use normalized::{DateParts, DocumentId, NormalizedValue, Reference, ReferencePart};
