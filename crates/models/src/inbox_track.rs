use serde::{Deserialize, Serialize};

use crate::normalized::{DateParts, DocumentId, NormalizedValue, Reference};

/// Pipeline state of an inbox track. Transitions are owned by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    #[default]
    New,
    Ready,
    Processing,
    Error,
}

/// A track moving through the ingestion pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InboxTrack {
    /// Storage key.
    #[serde(rename = "_id")]
    pub id: String,
    /// Logical key.
    #[serde(rename = "trackId")]
    pub track_id: String,
    pub source: String,
    pub title: NormalizedValue<String>,
    pub author: NormalizedValue<DocumentId>,
    pub location: NormalizedValue<DocumentId>,
    pub references: Vec<NormalizedValue<Reference>>,
    pub date: NormalizedValue<DateParts>,
    pub status: TrackStatus,
    pub extract_languages: Vec<String>,
    pub translate_into: Vec<String>,
}

impl InboxTrack {
    /// Fresh track as produced by ingestion: every field raw, status `new`.
    pub fn new(id: impl Into<String>, source: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            track_id: id.clone(),
            id,
            source: source.into(),
            title: NormalizedValue::raw(title.into()),
            author: NormalizedValue::raw(String::new()),
            location: NormalizedValue::raw(String::new()),
            references: Vec::new(),
            date: NormalizedValue::raw(String::new()),
            status: TrackStatus::New,
            extract_languages: Vec::new(),
            translate_into: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: TrackStatus) -> Self {
        self.status = status;
        self
    }
}
