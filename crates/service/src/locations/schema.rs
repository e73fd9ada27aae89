use std::collections::BTreeMap;

use models::Location;
use serde::{Deserialize, Serialize};

use crate::codec::Codec;

/// Storage key prefix shared by every location document.
pub const LOCATION_KEY_PREFIX: &str = "location::";

/// Storage key for the location with bare id `id`.
pub fn location_key(id: &str) -> String {
    format!("{LOCATION_KEY_PREFIX}{id}")
}

/// Location as stored: prefixed `_id` plus names keyed by language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocationCodec;

impl Codec<Location, LocationDocument> for LocationCodec {
    fn encode(&self, item: &Location) -> LocationDocument {
        LocationDocument { id: location_key(&item.id), name: item.name.clone() }
    }

    fn decode(&self, document: LocationDocument) -> Location {
        let id = match document.id.strip_prefix(LOCATION_KEY_PREFIX) {
            Some(bare) => bare.to_string(),
            None => document.id,
        };
        Location { id, name: document.name }
    }
}
