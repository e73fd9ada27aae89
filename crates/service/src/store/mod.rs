//! Document store contract and its backends.
//!
//! A store maps string keys to JSON documents, keeps keys in lexicographic
//! order and answers inclusive range scans over them.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;

pub mod json_store;
pub mod seaorm;

pub use json_store::JsonDocumentStore;
pub use seaorm::SeaOrmDocumentStore;

/// Highest code point. Keys compare as UTF-8 bytes, where `U+10FFFF`
/// (`F4 8F BF BF`) sorts after every other character, supplementary planes
/// included.
pub const PREFIX_SCAN_SENTINEL: char = char::MAX;

/// Inclusive key range. A missing bound is open on that side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyRange {
    pub start_key: Option<String>,
    pub end_key: Option<String>,
}

impl KeyRange {
    /// The whole key space.
    pub fn all() -> Self { Self::default() }

    pub fn between(start_key: impl Into<String>, end_key: impl Into<String>) -> Self {
        Self { start_key: Some(start_key.into()), end_key: Some(end_key.into()) }
    }

    /// `[prefix, prefix + U+10FFFF]`.
    pub fn prefix(prefix: &str) -> Self {
        Self::between(prefix, format!("{prefix}{PREFIX_SCAN_SENTINEL}"))
    }

    /// True when the start bound sorts after the end bound.
    pub fn is_inverted(&self) -> bool {
        matches!((&self.start_key, &self.end_key), (Some(s), Some(e)) if s > e)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.start_key.as_deref().map_or(true, |s| key >= s)
            && self.end_key.as_deref().map_or(true, |e| key <= e)
    }
}

/// Key-addressable JSON document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Document at `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError>;
    /// All `(key, document)` pairs inside `range`, ascending by key.
    async fn scan(&self, range: &KeyRange) -> Result<Vec<(String, Value)>, ServiceError>;
    /// Documents for the requested keys, in request order. Absent keys are skipped.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<(String, Value)>, ServiceError>;
    /// Insert or replace the document at `key`.
    async fn put(&self, key: &str, document: Value) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_range_covers_prefixed_keys_only() {
        let range = KeyRange::prefix("location::");
        assert!(range.contains("location::"));
        assert!(range.contains("location::mayapur"));
        assert!(range.contains("location::\u{fffe}"));
        assert!(range.contains("location::\u{ffff}"));
        assert!(range.contains("location::🕉"));
        assert!(range.contains("location::𠀀"));
        assert!(!range.contains("locations"));
        assert!(!range.contains("location:"));
        assert!(!range.contains("track::1"));
    }

    #[test]
    fn open_range_contains_everything() {
        let range = KeyRange::all();
        assert!(range.contains(""));
        assert!(range.contains("zzz"));
        assert!(!range.is_inverted());
    }

    #[test]
    fn inverted_range_is_detected() {
        assert!(KeyRange::between("b", "a").is_inverted());
        assert!(!KeyRange::between("a", "a").is_inverted());
    }
}
