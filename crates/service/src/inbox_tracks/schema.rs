use models::{DateParts, DocumentId, InboxTrack, NormalizedValue, Reference, TrackStatus};
use serde::{Deserialize, Serialize};

use crate::codec::Codec;

/// Inbox track as stored. Matches [`InboxTrack`] field for field, except
/// that fields added after the first schema version are optional here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InboxTrackDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "trackId")]
    pub track_id: String,
    pub source: String,
    pub title: NormalizedValue<String>,
    pub author: NormalizedValue<DocumentId>,
    pub location: NormalizedValue<DocumentId>,
    #[serde(default)]
    pub references: Vec<NormalizedValue<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NormalizedValue<DateParts>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackStatus>,
    #[serde(default)]
    pub extract_languages: Vec<String>,
    #[serde(default)]
    pub translate_into: Vec<String>,
}

/// Placeholder for documents written before tracks carried a date.
pub fn unknown_date() -> NormalizedValue<DateParts> {
    NormalizedValue::with_normalized(String::new(), vec![None, None, None])
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InboxTrackCodec;

impl Codec<InboxTrack, InboxTrackDocument> for InboxTrackCodec {
    fn encode(&self, item: &InboxTrack) -> InboxTrackDocument {
        InboxTrackDocument {
            id: item.id.clone(),
            track_id: item.track_id.clone(),
            source: item.source.clone(),
            title: item.title.clone(),
            author: item.author.clone(),
            location: item.location.clone(),
            references: item.references.clone(),
            date: Some(item.date.clone()),
            status: Some(item.status),
            extract_languages: item.extract_languages.clone(),
            translate_into: item.translate_into.clone(),
        }
    }

    fn decode(&self, document: InboxTrackDocument) -> InboxTrack {
        InboxTrack {
            id: document.id,
            track_id: document.track_id,
            source: document.source,
            title: document.title,
            author: document.author,
            location: document.location,
            references: document.references,
            date: document.date.unwrap_or_else(unknown_date),
            status: document.status.unwrap_or_default(),
            extract_languages: document.extract_languages,
            translate_into: document.translate_into,
        }
    }
}
