//! Locations repository. Locations are stored under `location::<id>` and
//! handed out with the bare id.

pub mod name;
pub mod schema;
pub mod service;

pub use name::NameResolution;
pub use schema::{location_key, LocationCodec, LocationDocument, LOCATION_KEY_PREFIX};
pub use service::LocationsService;
